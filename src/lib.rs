// FFI functions perform null checks before dereferencing raw pointers.
// Clippy cannot verify this statically, so we allow it at crate level.
#![allow(clippy::not_unsafe_ptr_arg_deref)]

//! SKK input method engine.
//!
//! [`SkkEngine`] ties the settings, the system and user dictionaries and one
//! conversion session together. Hosts written in other languages drive it
//! through the C ABI in [`ffi`].

mod engine;
pub mod ffi;
pub mod trace_init;

use std::path::PathBuf;

pub use engine::SkkEngine;
pub use skk_core::dict::{Candidate, DictError, LearningStore, Lookup, Mutate};
pub use skk_core::settings::{Settings, SettingsError};
pub use skk_session::{
    CandidateAction, InputSession, KanaStyle, KeyEvent, KeyResponse, MarkedText, Mode,
    SessionOptions,
};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("dictionary directory {0} does not exist")]
    MissingDirectory(PathBuf),

    #[error(transparent)]
    Dictionary(#[from] DictError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Install the settings in `path` as the global settings. Must run before
/// the first engine is opened.
pub fn load_settings_file(path: &std::path::Path) -> Result<(), EngineError> {
    let content = std::fs::read_to_string(path)?;
    skk_core::settings::init_custom(content)?;
    Ok(())
}
