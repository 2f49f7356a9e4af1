use std::path::Path;
use std::time::Duration;

use crate::models::error::RecorderError;

/// Interface for platform-specific clip playback.
pub trait PlaybackProvider {
    /// Open `path` for playback.
    ///
    /// Fails with `FileNotFound`, `Unplayable`, or `DeviceUnavailable`.
    fn open(&mut self, path: &Path) -> Result<Box<dyn ActivePlayback>, RecorderError>;
}

/// An opened player. Dropping it releases the output device.
pub trait ActivePlayback {
    fn begin(&mut self) -> Result<(), RecorderError>;

    /// Current playback position.
    fn position(&self) -> Duration;

    /// Total length of the clip.
    fn duration(&self) -> Duration;

    /// True once the whole clip has been played. Polled in place of a
    /// completion callback.
    fn is_finished(&self) -> bool;
}
