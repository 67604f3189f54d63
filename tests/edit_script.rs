//! Integration tests for the line-driven editor.
//!
//! These drive `run_script` end to end against an in-memory device that
//! answers key-config requests, without requiring a physical keyboard.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use vial_he::edit::run_script;
use vial_he::AppConfig;
use vial_he_keyboard::{EditorSession, FillPolicy, Keymap, KeymapModel, StaticKeycodeTable};
use vial_he_transport::protocol::{sub_cmd, MESSAGE_SIZE};
use vial_he_transport::{Transport, TransportDeviceInfo, TransportError};

/// Device with a key table; records every frame
#[derive(Default)]
struct MemoryDevice {
    info: TransportDeviceInfo,
    keys: Mutex<HashMap<(u8, u8), [u8; 5]>>,
    frames: Mutex<Vec<Vec<u8>>>,
}

impl Transport for MemoryDevice {
    fn send(&self, frame: &[u8], _retries: u32) -> Result<Vec<u8>, TransportError> {
        self.frames.lock().unwrap().push(frame.to_vec());
        let mut resp = vec![0u8; MESSAGE_SIZE];
        resp[..frame.len()].copy_from_slice(frame);
        let pos = (frame[3], frame[4]);
        match frame[1] {
            sub_cmd::GET_KEY_CONFIG => {
                let cfg = self.keys.lock().unwrap().get(&pos).copied().unwrap_or_default();
                resp[5..10].copy_from_slice(&cfg);
            }
            sub_cmd::SET_KEY_CONFIG => {
                let mut cfg = [0u8; 5];
                cfg.copy_from_slice(&frame[5..10]);
                self.keys.lock().unwrap().insert(pos, cfg);
            }
            _ => {}
        }
        Ok(resp)
    }

    fn device_info(&self) -> &TransportDeviceInfo {
        &self.info
    }
}

fn run(config: &AppConfig, keymap: &mut Keymap, script: &str) -> (Arc<MemoryDevice>, String) {
    let dev = Arc::new(MemoryDevice::default());
    dev.keys.lock().unwrap().insert((1, 2), [2, 30, 5, 10, 12]);

    let mut session = EditorSession::new(dev.clone(), config.session_options());
    let table = StaticKeycodeTable::new();
    let mut out = Vec::new();
    run_script(&mut session, keymap, &table, script.as_bytes(), &mut out).unwrap();
    (dev, String::from_utf8(out).unwrap())
}

fn set_frames(dev: &MemoryDevice) -> Vec<Vec<u8>> {
    dev.frames
        .lock()
        .unwrap()
        .iter()
        .filter(|f| f[1] == sub_cmd::SET_KEY_CONFIG)
        .cloned()
        .collect()
}

// ── Click to commit ──

#[test]
fn script_select_stage_and_commit() {
    let mut keymap = Keymap::grid(4, 3, 4);
    let (dev, out) = run(
        &AppConfig::default(),
        &mut keymap,
        "# read, stage, commit\n1,2\nmode 5\n1,2\nquit\n",
    );

    assert!(out.contains("Key: Row 1, Col 2 (click 1)"));
    assert!(out.contains("  Mode:             2 (Rapid Trigger)"));
    assert!(out.contains("  staged Mode = 5"));
    assert!(out.contains("Key: Row 1, Col 2 (click 2)"));
    assert!(out.contains("  wrote mode=5 actuation=0 deadzone=0 up=0 down=0"));
    assert_eq!(set_frames(&dev), vec![vec![0xFF, 2, 0, 1, 2, 5, 0, 0, 0, 0]]);
}

#[test]
fn script_last_fetched_policy_from_config() {
    let config: AppConfig = toml::from_str(r#"fill_policy = "last-fetched""#).unwrap();
    assert_eq!(config.fill_policy, FillPolicy::LastFetched);

    let mut keymap = Keymap::grid(4, 3, 4);
    let (dev, _) = run(&config, &mut keymap, "1,2\nmode 5\n1,2\n");
    assert_eq!(
        set_frames(&dev),
        vec![vec![0xFF, 2, 0, 1, 2, 5, 30, 5, 10, 12]]
    );
}

#[test]
fn script_interrupted_clicks_do_not_commit() {
    let mut keymap = Keymap::grid(4, 3, 4);
    let (dev, out) = run(
        &AppConfig::default(),
        &mut keymap,
        "1,2\nmode 5\nnone\n1,2\n0,0\n1,2\nlayer 1\n1,2\n",
    );
    assert!(set_frames(&dev).is_empty());
    assert!(out.contains("Key: None\n"));
    assert!(out.contains("Layer 1"));
}

#[test]
fn script_stops_at_quit() {
    let mut keymap = Keymap::grid(4, 3, 4);
    let (dev, _) = run(&AppConfig::default(), &mut keymap, "quit\n1,2\n1,2\n");
    assert!(dev.frames.lock().unwrap().is_empty());
}

// ── Errors keep the session going ──

#[test]
fn script_reports_bad_lines_and_continues() {
    let mut keymap = Keymap::grid(2, 3, 4);
    let (_, out) = run(
        &AppConfig::default(),
        &mut keymap,
        "travel 3\nmode 300\nlayer 9\n1,2\n",
    );
    assert!(out.contains("error: unknown field: \"travel\""));
    assert!(out.contains("error: Mode must be 0-255, got \"300\""));
    assert!(out.contains("error: layer 9 out of range"));
    assert!(out.contains("Key: Row 1, Col 2 (click 1)"));
}

#[test]
fn script_without_hall_effect_sends_nothing() {
    let config = AppConfig {
        has_hall_effect: false,
        ..Default::default()
    };
    let mut keymap = Keymap::grid(2, 3, 4);
    let (dev, out) = run(&config, &mut keymap, "1,2\nmode 2\n1,2\n");
    assert!(dev.frames.lock().unwrap().is_empty());
    assert_eq!(out.matches("error: Feature not supported").count(), 3);
}

// ── Keymap edits ──

#[test]
fn script_keycode_edits() {
    let mut keymap = Keymap::grid(2, 1, 3);
    keymap.set_key(0, 0, 0, "LT2(KC_SPACE)");

    let (_, out) = run(
        &AppConfig::default(),
        &mut keymap,
        "0,0\nmask KC_ENTER\nkc KC_B\nshow\n",
    );

    assert_eq!(keymap.keycode(0, 0, 0), "LT2(KC_ENTER)");
    assert_eq!(keymap.keycode(0, 0, 1), "KC_B");
    assert!(out.contains("  set LT2(KC_ENTER)"));
    assert!(out.contains("Key: Row 0, Col 2 (layer 0)"));
    assert!(out.contains("  keycode: KC_NO"));
}
