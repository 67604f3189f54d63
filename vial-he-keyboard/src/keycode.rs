//! Keycode lookup used by the masked-keycode path
//!
//! Keycodes are handled in their QMK symbolic form (`KC_A`, `LCTL_T(KC_A)`).
//! Wrapper keycodes are described by a template whose inner placeholder is
//! the literal `kc`, e.g. `LT1(kc)`.

use std::collections::HashSet;

/// Placeholder for the inner code in a wrapper template
pub const INNER_PLACEHOLDER: &str = "(kc)";

/// Reference to a keycode by its QMK symbolic id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeycodeRef {
    qmk_id: String,
}

impl KeycodeRef {
    pub fn new(qmk_id: impl Into<String>) -> Self {
        Self {
            qmk_id: qmk_id.into(),
        }
    }

    pub fn qmk_id(&self) -> &str {
        &self.qmk_id
    }
}

/// Keycode classification capability
pub trait KeycodeTable {
    /// Whether `code` is a basic (byte-sized) keycode that may be nested
    fn is_basic(&self, code: &str) -> bool;

    /// Wrapper template of `code` (e.g. `LT1(kc)` for `LT1(KC_A)`)
    fn find_outer_keycode(&self, code: &str) -> Option<KeycodeRef>;

    /// Inner keycode of `code`; `code` itself when it is not wrapped
    fn find_inner_keycode(&self, code: &str) -> KeycodeRef;
}

/// Wrapper prefixes understood by [`StaticKeycodeTable`]
const WRAPPERS: &[&str] = &[
    "LCTL", "LSFT", "LALT", "LGUI", "RCTL", "RSFT", "RALT", "RGUI", "LCTL_T", "LSFT_T", "LALT_T",
    "LGUI_T", "RCTL_T", "RSFT_T", "RALT_T", "RGUI_T", "C_S", "MEH", "HYPR", "MEH_T", "ALL_T",
];

/// Number of layer-tap wrappers (`LT0` .. `LT15`)
const LAYER_TAP_COUNT: u8 = 16;

const NAMED_BASIC: &[&str] = &[
    "KC_NO", "KC_TRNS", "KC_ENTER", "KC_ESCAPE", "KC_BSPACE", "KC_TAB", "KC_SPACE", "KC_MINUS",
    "KC_EQUAL", "KC_LBRACKET", "KC_RBRACKET", "KC_BSLASH", "KC_NONUS_HASH", "KC_SCOLON",
    "KC_QUOTE", "KC_GRAVE", "KC_COMMA", "KC_DOT", "KC_SLASH", "KC_CAPSLOCK", "KC_PSCREEN",
    "KC_SCROLLLOCK", "KC_PAUSE", "KC_INSERT", "KC_HOME", "KC_PGUP", "KC_DELETE", "KC_END",
    "KC_PGDOWN", "KC_RIGHT", "KC_LEFT", "KC_DOWN", "KC_UP", "KC_NUMLOCK", "KC_KP_SLASH",
    "KC_KP_ASTERISK", "KC_KP_MINUS", "KC_KP_PLUS", "KC_KP_ENTER", "KC_KP_DOT", "KC_NONUS_BSLASH",
    "KC_APPLICATION", "KC_LCTRL", "KC_LSHIFT", "KC_LALT", "KC_LGUI", "KC_RCTRL", "KC_RSHIFT",
    "KC_RALT", "KC_RGUI",
];

/// Built-in table of the common QMK basic and wrapper keycodes
#[derive(Debug, Clone)]
pub struct StaticKeycodeTable {
    basic: HashSet<String>,
    wrappers: HashSet<String>,
}

impl Default for StaticKeycodeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticKeycodeTable {
    pub fn new() -> Self {
        let mut basic: HashSet<String> = NAMED_BASIC.iter().map(|s| s.to_string()).collect();
        basic.extend((b'A'..=b'Z').map(|c| format!("KC_{}", c as char)));
        basic.extend((0..=9).map(|d| format!("KC_{d}")));
        basic.extend((1..=24).map(|n| format!("KC_F{n}")));
        basic.extend((0..=9).map(|d| format!("KC_KP_{d}")));

        let mut wrappers: HashSet<String> = WRAPPERS.iter().map(|s| s.to_string()).collect();
        wrappers.extend((0..LAYER_TAP_COUNT).map(|n| format!("LT{n}")));

        Self { basic, wrappers }
    }

    /// Split `OUTER(INNER)` into its parts
    fn split(code: &str) -> Option<(&str, &str)> {
        let (outer, rest) = code.split_once('(')?;
        let inner = rest.strip_suffix(')')?;
        Some((outer, inner))
    }
}

impl KeycodeTable for StaticKeycodeTable {
    fn is_basic(&self, code: &str) -> bool {
        self.basic.contains(code)
    }

    fn find_outer_keycode(&self, code: &str) -> Option<KeycodeRef> {
        let (outer, _) = Self::split(code)?;
        self.wrappers
            .contains(outer)
            .then(|| KeycodeRef::new(format!("{outer}{INNER_PLACEHOLDER}")))
    }

    fn find_inner_keycode(&self, code: &str) -> KeycodeRef {
        match Self::split(code) {
            Some((outer, inner)) if self.wrappers.contains(outer) => KeycodeRef::new(inner),
            _ => KeycodeRef::new(code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_classification() {
        let table = StaticKeycodeTable::new();
        assert!(table.is_basic("KC_A"));
        assert!(table.is_basic("KC_F24"));
        assert!(table.is_basic("KC_0"));
        assert!(!table.is_basic("LT1(KC_A)"));
        assert!(!table.is_basic("MO(1)"));
    }

    #[test]
    fn test_outer_keycode() {
        let table = StaticKeycodeTable::new();
        assert_eq!(
            table.find_outer_keycode("LT1(KC_A)"),
            Some(KeycodeRef::new("LT1(kc)"))
        );
        assert_eq!(
            table.find_outer_keycode("LCTL_T(KC_ESCAPE)"),
            Some(KeycodeRef::new("LCTL_T(kc)"))
        );
        assert_eq!(table.find_outer_keycode("KC_A"), None);
        assert_eq!(table.find_outer_keycode("FOO(KC_A)"), None);
    }

    #[test]
    fn test_inner_keycode() {
        let table = StaticKeycodeTable::new();
        assert_eq!(table.find_inner_keycode("LSFT(KC_B)").qmk_id(), "KC_B");
        assert_eq!(table.find_inner_keycode("KC_B").qmk_id(), "KC_B");
    }
}
