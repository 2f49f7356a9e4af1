use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while recording, playing, or managing clips.
///
/// None of these are fatal: the recorder reports them as status text and
/// stays usable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecorderError {
    #[error("permission denied")]
    PermissionDenied,

    #[error("device not available: {0}")]
    DeviceUnavailable(String),

    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("unplayable file: {0}")]
    Unplayable(String),

    #[error("storage error: {0}")]
    StorageError(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("no recording at index {0}")]
    InvalidIndex(usize),

    #[error("no recording found to play")]
    NoRecording,

    #[error("share failed: {0}")]
    ShareFailed(String),

    #[error("configuration failed: {0}")]
    ConfigurationFailed(String),
}
