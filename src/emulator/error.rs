use std::path::PathBuf;
use thiserror::Error;

use crate::emulator::memory::MAX_PROGRAM_SIZE;

/// Reasons a ROM could not be loaded.
#[derive(Debug, Error)]
pub enum LoadRomError {
    #[error("ROM not found: {}", .path.display())]
    RomNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("ROM is empty")]
    RomEmpty,

    #[error("ROM exceeds maximum size ({size} bytes, at most {} allowed)", MAX_PROGRAM_SIZE)]
    RomTooBig { size: usize },
}

/// A backend that could not set up its screen, input or audio.
#[derive(Debug, Error)]
#[error("backend failed: {message}")]
pub struct BackendError {
    message: String,
}

impl BackendError {
    pub fn new<S: Into<String>>(message: S) -> BackendError {
        BackendError {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for BackendError {
    fn from(err: std::io::Error) -> Self {
        BackendError::new(err.to_string())
    }
}

/// Reasons the run loop refused to start.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("no ROM loaded")]
    NoRomLoaded,

    #[error(transparent)]
    Backend(#[from] BackendError),
}
