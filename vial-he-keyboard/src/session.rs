//! Editor session: click state, staged values and keymap edits for one device

use tracing::{debug, warn};
use vial_he_transport::protocol::timing;
use vial_he_transport::{AnalogConfig, BoxedTransport};

use crate::analog::{FillPolicy, SetPendingField};
use crate::click::{ClickAction, ClickCommitStateMachine, ClickState};
use crate::error::KeyboardError;
use crate::keycode::KeycodeTable;
use crate::keymap::{HallEffectTab, KeymapModel};
use crate::masked::MaskedKeycodeTranslator;
use crate::store::KeyConfigStore;
use crate::target::{self, SelectionTarget};

/// Device capabilities and editor settings a session is built with
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub has_hall_effect: bool,
    pub hall_effect_tabs: Vec<String>,
    pub fill_policy: FillPolicy,
    pub retries: u32,
    pub lut_commands: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            has_hall_effect: true,
            hall_effect_tabs: vec![HallEffectTab::KeyConfig.name().to_string()],
            fill_policy: FillPolicy::default(),
            retries: timing::DEFAULT_RETRIES,
            lut_commands: false,
        }
    }
}

impl SessionOptions {
    /// Capabilities as advertised by a keyboard definition
    pub fn from_keymap(keymap: &dyn KeymapModel) -> Self {
        Self {
            has_hall_effect: keymap.has_hall_effect(),
            hall_effect_tabs: keymap.hall_effect_tabs().to_vec(),
            ..Default::default()
        }
    }
}

/// Result of one selection event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionOutcome {
    pub target: Option<SelectionTarget>,
    /// Consecutive selections of `target`
    pub repeat_count: u32,
    /// Config written to the device by this selection, if any
    pub committed: Option<AnalogConfig>,
    /// Config read back for display (matrix keys only)
    pub displayed: Option<AnalogConfig>,
}

/// All mutable editor state for the active device
///
/// Replaced wholesale on device change (see [`EditorSession::reset`]).
pub struct EditorSession {
    store: KeyConfigStore,
    clicks: ClickCommitStateMachine,
    options: SessionOptions,
    layer: u8,
    active: Option<SelectionTarget>,
}

impl EditorSession {
    pub fn new(transport: BoxedTransport, options: SessionOptions) -> Self {
        let store = KeyConfigStore::new(transport)
            .with_retries(options.retries)
            .with_fill_policy(options.fill_policy)
            .with_lut_commands(options.lut_commands);
        Self {
            store,
            clicks: ClickCommitStateMachine::new(),
            options,
            layer: 0,
            active: None,
        }
    }

    /// Start over with a different device
    pub fn reset(&mut self, transport: BoxedTransport, options: SessionOptions) {
        *self = Self::new(transport, options);
    }

    /// Whether the device supports analog key configuration
    pub fn valid(&self) -> bool {
        self.options.has_hall_effect
    }

    fn ensure_valid(&self) -> Result<(), KeyboardError> {
        if self.valid() {
            Ok(())
        } else {
            warn!("Device has no Hall Effect support");
            Err(KeyboardError::NotSupported(
                "Device does not have Hall Effect switches".into(),
            ))
        }
    }

    /// Tabs to show for this device
    pub fn tabs(&self) -> Vec<HallEffectTab> {
        if !self.valid() {
            return Vec::new();
        }
        HallEffectTab::parse_list(&self.options.hall_effect_tabs)
    }

    pub fn store(&self) -> &KeyConfigStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut KeyConfigStore {
        &mut self.store
    }

    pub fn click_state(&self) -> ClickState {
        self.clicks.state()
    }

    pub fn layer(&self) -> u8 {
        self.layer
    }

    pub fn active(&self) -> Option<SelectionTarget> {
        self.active
    }

    /// Handle a key click (`None` = clicked on empty space)
    ///
    /// A repeated click on the same key commits the staged values before
    /// reading the key back. If the commit fails the error is returned and
    /// no read is attempted.
    pub fn select(
        &mut self,
        selection: Option<SelectionTarget>,
    ) -> Result<SelectionOutcome, KeyboardError> {
        self.ensure_valid()?;
        self.active = selection;

        let mut outcome = SelectionOutcome {
            target: selection,
            ..Default::default()
        };
        let refresh_target = match self.clicks.on_select(selection) {
            ClickAction::Clear => None,
            ClickAction::Refresh(t) => Some(t),
            ClickAction::CommitAndRefresh(t) => {
                outcome.committed = self.store.commit(&t)?;
                Some(t)
            }
        };
        outcome.repeat_count = self.clicks.repeat_count();

        if let Some((row, col)) = refresh_target.as_ref().and_then(SelectionTarget::coordinate) {
            outcome.displayed = Some(self.store.select(row, col)?);
        }
        Ok(outcome)
    }

    /// Stage one option value
    pub fn apply(&mut self, cmd: SetPendingField) -> Result<(), KeyboardError> {
        self.ensure_valid()?;
        self.store.apply(cmd);
        Ok(())
    }

    /// Change the current layer; deselects the active key
    pub fn switch_layer(&mut self, layer: u8) {
        self.deselect();
        self.layer = layer;
    }

    fn deselect(&mut self) {
        self.active = None;
        self.clicks.reset();
    }

    /// "Key: Row r, Col c" or "Key: None"
    pub fn key_label(&self) -> String {
        target::key_label(self.active.as_ref())
    }

    /// Assign `code` to the active key on the current layer, then select the
    /// next key
    ///
    /// With `masked` set only the inner code of the existing wrapper is
    /// replaced; a rejected masked edit leaves the keymap untouched but still
    /// advances. Moving on disarms the click counter, so the next click on any
    /// key only reads. Returns the keycode that was stored, if any.
    pub fn set_keycode(
        &mut self,
        keymap: &mut dyn KeymapModel,
        table: &dyn KeycodeTable,
        code: &str,
        masked: bool,
    ) -> Result<Option<String>, KeyboardError> {
        self.ensure_valid()?;
        let Some(active) = self.active else {
            return Ok(None);
        };

        let mut written = None;
        if let Some((row, col)) = active.coordinate() {
            let existing = keymap.keycode(self.layer, row, col);
            let translator = MaskedKeycodeTranslator::new(table);
            if let Some(new) = translator.write(&existing, code, masked) {
                debug!(
                    "Layer {} ({}, {}): {} -> {}",
                    self.layer, row, col, existing, new
                );
                keymap.set_key(self.layer, row, col, &new);
                written = Some(new);
            }
        }

        self.select_next(keymap, active);
        Ok(written)
    }

    fn select_next(&mut self, keymap: &dyn KeymapModel, current: SelectionTarget) {
        let next = current.coordinate().and_then(|pos| {
            let keys = keymap.keys();
            let idx = keys.iter().position(|k| *k == pos)?;
            keys.get(idx + 1).copied()
        });
        self.deselect();
        if let Some((row, col)) = next {
            self.active = Some(SelectionTarget::matrix(row, col));
        }
    }

    /// Keycode to show for the active key
    pub fn keycode_for_display(
        &self,
        keymap: &dyn KeymapModel,
        table: &dyn KeycodeTable,
        masked: bool,
    ) -> Option<String> {
        let translator = MaskedKeycodeTranslator::new(table);
        let code = match self.active? {
            SelectionTarget::Matrix { row, col } => keymap.keycode(self.layer, row, col),
            SelectionTarget::Encoder { index, direction } => {
                keymap.encoder_keycode(self.layer, index, direction)
            }
        };
        Some(translator.read(&code, masked))
    }
}
