//! Hall Effect key configuration for Vial keyboards
//!
//! This crate sits on top of any [`vial_he_transport::Transport`] and provides:
//!
//! - [`KeyConfigStore`]: the selected key's analog config plus staged edits
//! - [`ClickCommitStateMachine`]: repeated clicks on a key commit staged values
//! - [`MaskedKeycodeTranslator`]: editing the inner code of wrapper keycodes
//! - [`EditorSession`]: all of the above bundled per device

pub mod analog;
pub mod click;
pub mod error;
pub mod keycode;
pub mod keymap;
pub mod lut;
pub mod masked;
pub mod session;
pub mod store;
pub mod target;

pub use analog::{AnalogField, FillPolicy, KeyMode, PendingConfig, SetPendingField};
pub use click::{ClickAction, ClickCommitStateMachine, ClickState};
pub use error::KeyboardError;
pub use keycode::{KeycodeRef, KeycodeTable, StaticKeycodeTable};
pub use keymap::{HallEffectTab, Keymap, KeymapModel};
pub use lut::{LutChannel, LutField, PendingLut};
pub use masked::MaskedKeycodeTranslator;
pub use session::{EditorSession, SelectionOutcome, SessionOptions};
pub use store::KeyConfigStore;
pub use target::SelectionTarget;

pub use vial_he_transport::{AnalogConfig, LutChannelConfig};
