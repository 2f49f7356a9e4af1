//! # clip-recorder-core
//!
//! Platform-agnostic core of the clip recorder.
//!
//! Records short clips into a directory, keeps the ordered list of clips,
//! and coordinates playback so that only one clip plays at a time. Audio
//! devices, the permission prompt, and the share surface are traits that
//! backends implement; `clip-recorder-cpal` provides the desktop ones.
//!
//! ## Architecture
//!
//! ```text
//! clip-recorder-core (this crate)
//! ├── traits/       ← CaptureProvider, PlaybackProvider, PermissionAuthority, ShareTarget, RecorderDelegate
//! ├── models/       ← RecorderError, RecorderConfig, RecordingEntry, Command, Notification, states
//! ├── processing/   ← sample conversion
//! ├── storage/      ← RecordingListStore, WavFileWriter, file naming
//! └── session/      ← RecordingController, PlaybackCoordinator, ProgressTicker, Recorder
//! ```

pub mod models;
pub mod processing;
pub mod session;
pub mod storage;
pub mod traits;

#[cfg(test)]
mod testing;

// Re-export key types at crate root for convenience.
pub use models::config::{AudioFormat, RecorderConfig};
pub use models::entry::RecordingEntry;
pub use models::error::RecorderError;
pub use models::events::{Command, ListEvent, Notification};
pub use models::recording_result::CaptureOutput;
pub use models::state::{PlaybackState, PlaybackTarget, RecordingState};
pub use processing::sample_converter::SampleConverter;
pub use session::playback::PlaybackCoordinator;
pub use session::recorder::Recorder;
pub use session::recording::RecordingController;
pub use session::ticker::ProgressTicker;
pub use storage::list_store::RecordingListStore;
pub use storage::wav_writer::WavFileWriter;
pub use traits::capture_provider::{ActiveCapture, AudioSource, CaptureProvider};
pub use traits::permission::{PermissionAuthority, PermissionStatus, StaticPermission};
pub use traits::playback_provider::{ActivePlayback, PlaybackProvider};
pub use traits::recorder_delegate::RecorderDelegate;
pub use traits::share_target::ShareTarget;
