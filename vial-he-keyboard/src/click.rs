//! Click-to-commit state machine
//!
//! The first click on a key only reads its configuration. Every further
//! consecutive click on the same key writes the staged values to it. There
//! is no time window.

use crate::target::SelectionTarget;

/// Repeat tracking state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClickState {
    #[default]
    Idle,
    Selected {
        target: SelectionTarget,
        /// Consecutive selections of `target` (always >= 1)
        count: u32,
    },
}

/// What the caller has to do after a selection event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    /// Nothing selected: clear the display
    Clear,
    /// Read the target's configuration
    Refresh(SelectionTarget),
    /// Write staged values to the target, then read it back
    CommitAndRefresh(SelectionTarget),
}

#[derive(Debug, Default)]
pub struct ClickCommitStateMachine {
    state: ClickState,
}

impl ClickCommitStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ClickState {
        self.state
    }

    /// Consecutive selection count of the current target (0 when idle)
    pub fn repeat_count(&self) -> u32 {
        match self.state {
            ClickState::Idle => 0,
            ClickState::Selected { count, .. } => count,
        }
    }

    /// Feed one selection event
    pub fn on_select(&mut self, selection: Option<SelectionTarget>) -> ClickAction {
        let Some(target) = selection else {
            self.state = ClickState::Idle;
            return ClickAction::Clear;
        };

        match self.state {
            ClickState::Selected { target: last, count } if last == target => {
                self.state = ClickState::Selected {
                    target,
                    count: count.saturating_add(1),
                };
                ClickAction::CommitAndRefresh(target)
            }
            _ => {
                self.state = ClickState::Selected { target, count: 1 };
                ClickAction::Refresh(target)
            }
        }
    }

    pub fn reset(&mut self) {
        self.state = ClickState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: SelectionTarget = SelectionTarget::Matrix { row: 1, col: 2 };
    const B: SelectionTarget = SelectionTarget::Matrix { row: 0, col: 0 };

    #[test]
    fn test_repeat_same_key_commits_every_time() {
        let mut sm = ClickCommitStateMachine::new();
        assert_eq!(sm.on_select(Some(A)), ClickAction::Refresh(A));
        assert_eq!(sm.repeat_count(), 1);
        assert_eq!(sm.on_select(Some(A)), ClickAction::CommitAndRefresh(A));
        assert_eq!(sm.repeat_count(), 2);
        assert_eq!(sm.on_select(Some(A)), ClickAction::CommitAndRefresh(A));
        assert_eq!(
            sm.state(),
            ClickState::Selected {
                target: A,
                count: 3
            }
        );
    }

    #[test]
    fn test_other_key_breaks_the_run() {
        let mut sm = ClickCommitStateMachine::new();
        assert_eq!(sm.on_select(Some(A)), ClickAction::Refresh(A));
        assert_eq!(sm.on_select(Some(B)), ClickAction::Refresh(B));
        assert_eq!(sm.on_select(Some(A)), ClickAction::Refresh(A));
        assert_eq!(sm.repeat_count(), 1);
    }

    #[test]
    fn test_deselect_resets() {
        let mut sm = ClickCommitStateMachine::new();
        sm.on_select(Some(A));
        assert_eq!(sm.on_select(None), ClickAction::Clear);
        assert_eq!(sm.state(), ClickState::Idle);
        assert_eq!(sm.on_select(Some(A)), ClickAction::Refresh(A));
    }

    #[test]
    fn test_reset() {
        let mut sm = ClickCommitStateMachine::new();
        sm.on_select(Some(A));
        sm.reset();
        assert_eq!(sm.on_select(Some(A)), ClickAction::Refresh(A));
    }
}
