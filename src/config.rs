//! Configuration file for the vial-he tool
//!
//! Stored as TOML, by default at `~/.config/vial-he/config.toml`. Every key is
//! optional; missing keys take their default values.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use vial_he_keyboard::{FillPolicy, HallEffectTab, SessionOptions};
use vial_he_transport::protocol::timing;

/// Tool configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// hidapi path of the keyboard's raw-HID interface (used when `--device` is absent)
    pub device_path: Option<String>,
    /// Attempts per request before giving up
    pub retries: u32,
    /// Per-attempt read timeout in milliseconds
    pub read_timeout_ms: i32,
    /// How fields never staged are filled on commit
    pub fill_policy: FillPolicy,
    /// Allow the LUT get/set sub-commands
    pub lut_commands: bool,
    /// Whether the keyboard has analog (Hall Effect) keys
    pub has_hall_effect: bool,
    /// Editor tabs the keyboard advertises
    pub hall_effect_tabs: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            device_path: None,
            retries: timing::DEFAULT_RETRIES,
            read_timeout_ms: timing::DEFAULT_READ_TIMEOUT_MS,
            fill_policy: FillPolicy::Zero,
            lut_commands: false,
            has_hall_effect: true,
            hall_effect_tabs: vec![HallEffectTab::KeyConfig.name().to_string()],
        }
    }
}

impl AppConfig {
    /// Default config file location
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vial-he")
            .join("config.toml")
    }

    /// Load config from a file, or return default if not found
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: AppConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to a file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Editor session settings derived from this config
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            has_hall_effect: self.has_hall_effect,
            hall_effect_tabs: self.hall_effect_tabs.clone(),
            fill_policy: self.fill_policy,
            retries: self.retries,
            lut_commands: self.lut_commands,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.retries, 20);
        assert_eq!(config.read_timeout_ms, 500);
        assert_eq!(config.fill_policy, FillPolicy::Zero);
        assert!(!config.lut_commands);
    }

    #[test]
    fn test_partial_file() {
        let config: AppConfig = toml::from_str(
            r#"
            device_path = "/dev/hidraw3"
            fill_policy = "last-fetched"
            hall_effect_tabs = ["Key Config", "Joystick"]
            "#,
        )
        .unwrap();
        assert_eq!(config.device_path.as_deref(), Some("/dev/hidraw3"));
        assert_eq!(config.fill_policy, FillPolicy::LastFetched);
        assert_eq!(config.retries, 20);

        let opts = config.session_options();
        assert_eq!(opts.fill_policy, FillPolicy::LastFetched);
        assert_eq!(opts.hall_effect_tabs.len(), 2);
    }

    #[test]
    fn test_unknown_fill_policy_is_rejected() {
        assert!(toml::from_str::<AppConfig>(r#"fill_policy = "previous""#).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("vial-he-config-{}", std::process::id()));
        let path = dir.join("config.toml");
        let config = AppConfig {
            device_path: Some("/dev/hidraw7".into()),
            retries: 5,
            lut_commands: true,
            ..Default::default()
        };
        config.save(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("fill_policy = \"zero\""));
        assert_eq!(AppConfig::load(&path).unwrap(), config);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("vial-he-does-not-exist/config.toml");
        assert_eq!(AppConfig::load(&path).unwrap(), AppConfig::default());
    }
}
