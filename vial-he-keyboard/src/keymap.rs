//! Keymap model used by the editor session

use std::collections::HashMap;
use std::fmt;

/// Keycode reported for unassigned positions
pub const EMPTY_KEYCODE: &str = "KC_NO";

/// Editor tabs a Hall Effect keyboard can advertise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HallEffectTab {
    KeyConfig,
    Displacement,
    Joystick,
    Calibration,
}

impl HallEffectTab {
    pub const ALL: [HallEffectTab; 4] = [
        HallEffectTab::KeyConfig,
        HallEffectTab::Displacement,
        HallEffectTab::Joystick,
        HallEffectTab::Calibration,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::KeyConfig => "Key Config",
            Self::Displacement => "Displacement",
            Self::Joystick => "Joystick",
            Self::Calibration => "Calibration",
        }
    }

    /// Exact, case-sensitive lookup by display name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.name() == name)
    }

    /// Known tabs among `names`, in definition order; unknown names are ignored
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> Vec<HallEffectTab> {
        names
            .iter()
            .filter_map(|n| Self::from_name(n.as_ref()))
            .collect()
    }
}

impl fmt::Display for HallEffectTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Keyboard definition and keymap owned by the embedding application
pub trait KeymapModel {
    fn keycode(&self, layer: u8, row: u8, col: u8) -> String;
    fn set_key(&mut self, layer: u8, row: u8, col: u8, code: &str);
    fn encoder_keycode(&self, layer: u8, index: u8, direction: u8) -> String;
    fn set_encoder(&mut self, layer: u8, index: u8, direction: u8, code: &str);
    /// Matrix positions in layout order
    fn keys(&self) -> &[(u8, u8)];
    /// Encoder indices
    fn encoders(&self) -> &[u8];
    fn layers(&self) -> u8;
    fn has_hall_effect(&self) -> bool;
    fn hall_effect_tabs(&self) -> &[String];
}

/// In-memory keymap
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    layers: u8,
    keys: Vec<(u8, u8)>,
    encoders: Vec<u8>,
    layout: HashMap<(u8, u8, u8), String>,
    encoder_layout: HashMap<(u8, u8, u8), String>,
    has_hall_effect: bool,
    hall_effect_tabs: Vec<String>,
}

impl Keymap {
    pub fn new(layers: u8, keys: Vec<(u8, u8)>) -> Self {
        Self {
            layers,
            keys,
            ..Default::default()
        }
    }

    /// Full `rows` x `cols` matrix in row-major order
    pub fn grid(layers: u8, rows: u8, cols: u8) -> Self {
        let keys = (0..rows)
            .flat_map(|r| (0..cols).map(move |c| (r, c)))
            .collect();
        Self::new(layers, keys)
    }

    pub fn with_encoders(mut self, count: u8) -> Self {
        self.encoders = (0..count).collect();
        self
    }

    pub fn with_hall_effect(mut self, tabs: &[String]) -> Self {
        self.has_hall_effect = true;
        self.hall_effect_tabs = tabs.to_vec();
        self
    }
}

impl KeymapModel for Keymap {
    fn keycode(&self, layer: u8, row: u8, col: u8) -> String {
        self.layout
            .get(&(layer, row, col))
            .cloned()
            .unwrap_or_else(|| EMPTY_KEYCODE.to_string())
    }

    fn set_key(&mut self, layer: u8, row: u8, col: u8, code: &str) {
        self.layout.insert((layer, row, col), code.to_string());
    }

    fn encoder_keycode(&self, layer: u8, index: u8, direction: u8) -> String {
        self.encoder_layout
            .get(&(layer, index, direction))
            .cloned()
            .unwrap_or_else(|| EMPTY_KEYCODE.to_string())
    }

    fn set_encoder(&mut self, layer: u8, index: u8, direction: u8, code: &str) {
        self.encoder_layout
            .insert((layer, index, direction), code.to_string());
    }

    fn keys(&self) -> &[(u8, u8)] {
        &self.keys
    }

    fn encoders(&self) -> &[u8] {
        &self.encoders
    }

    fn layers(&self) -> u8 {
        self.layers
    }

    fn has_hall_effect(&self) -> bool {
        self.has_hall_effect
    }

    fn hall_effect_tabs(&self) -> &[String] {
        &self.hall_effect_tabs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tab_list_filters_unknown() {
        let tabs = HallEffectTab::parse_list(&["Joystick", "Macros", "Key Config", "joystick"]);
        assert_eq!(tabs, vec![HallEffectTab::Joystick, HallEffectTab::KeyConfig]);
        assert!(HallEffectTab::parse_list::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_keymap_defaults_and_set() {
        let mut km = Keymap::grid(2, 2, 3);
        assert_eq!(km.keys().len(), 6);
        assert_eq!(km.keys()[4], (1, 1));
        assert_eq!(km.keycode(0, 1, 1), EMPTY_KEYCODE);
        km.set_key(1, 1, 1, "KC_A");
        assert_eq!(km.keycode(1, 1, 1), "KC_A");
        assert_eq!(km.keycode(0, 1, 1), EMPTY_KEYCODE);
        let mut km = km.with_encoders(2);
        assert_eq!(km.encoders(), &[0, 1]);
        km.set_encoder(0, 0, 1, "KC_VOLU");
        assert_eq!(km.encoder_keycode(0, 0, 1), "KC_VOLU");
    }
}
