//! vial-he: analog key configuration for Vial Hall Effect keyboards
//!
//! The binary is a thin layer over [`vial_he_keyboard`]; this library part
//! holds what the binary and its tests share.

pub mod config;
pub mod edit;
pub mod render;

pub use config::AppConfig;
