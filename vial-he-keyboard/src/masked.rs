//! Masked keycode editing
//!
//! A masked slot edits only the inner code of a wrapper keycode such as
//! `LT1(KC_A)`; the wrapper itself is kept.

use tracing::debug;

use crate::keycode::{KeycodeTable, INNER_PLACEHOLDER};

/// Translates between the flat keycode the user picks and the stored keycode
pub struct MaskedKeycodeTranslator<'a, T: KeycodeTable + ?Sized> {
    table: &'a T,
}

impl<'a, T: KeycodeTable + ?Sized> MaskedKeycodeTranslator<'a, T> {
    pub fn new(table: &'a T) -> Self {
        Self { table }
    }

    /// Keycode to store when the user picks `new` for a slot holding `existing`
    ///
    /// Returns `None` when a masked edit is rejected: `new` is not a basic
    /// keycode, or `existing` has no resolvable wrapper.
    pub fn write(&self, existing: &str, new: &str, masked: bool) -> Option<String> {
        if !masked {
            return Some(new.to_string());
        }
        if !self.table.is_basic(new) {
            debug!("Rejected masked edit: {} is not a basic keycode", new);
            return None;
        }
        let Some(outer) = self.table.find_outer_keycode(existing) else {
            debug!("Rejected masked edit: {} has no wrapper", existing);
            return None;
        };
        Some(
            outer
                .qmk_id()
                .replace(INNER_PLACEHOLDER, &format!("({new})")),
        )
    }

    /// Keycode to show for a slot holding `existing`
    pub fn read(&self, existing: &str, masked: bool) -> String {
        if masked {
            self.table.find_inner_keycode(existing).qmk_id().to_string()
        } else {
            existing.to_string()
        }
    }
}
