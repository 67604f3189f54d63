//! Integration tests against a real keyboard.
//!
//! These tests require a Vial Hall Effect keyboard; point `VIAL_HE_DEVICE`
//! at its raw-HID interface path.
//! Run with: VIAL_HE_DEVICE=/dev/hidrawN cargo test -p vial-he-keyboard --test device_queries -- --ignored --nocapture

use std::sync::Arc;

use hidapi::HidApi;
use vial_he_keyboard::{EditorSession, SelectionTarget, SessionOptions};
use vial_he_transport::{BoxedTransport, HidRawTransport};

fn open_session() -> EditorSession {
    let path = std::env::var("VIAL_HE_DEVICE")
        .expect("Set VIAL_HE_DEVICE to the keyboard's raw-HID path");
    let api = HidApi::new().expect("hidapi init failed");
    let transport: BoxedTransport =
        Arc::new(HidRawTransport::open_path(&api, &path).expect("failed to open device"));
    EditorSession::new(transport, SessionOptions::default())
}

/// A single click only reads, so this never writes to the device.
#[test]
#[ignore] // requires hardware
fn read_first_key_config() {
    let mut session = open_session();
    let key = SelectionTarget::matrix(0, 0);

    let outcome = session.select(Some(key)).expect("get_key_config failed");
    let cfg = outcome.displayed.expect("matrix key has a config");
    println!("Key (0, 0): {cfg:?}");
    assert_eq!(outcome.repeat_count, 1);
    assert_eq!(outcome.committed, None);
    assert_eq!(session.key_label(), "Key: Row 0, Col 0");
}
