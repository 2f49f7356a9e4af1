use std::path::PathBuf;

use super::entry::RecordingEntry;
use super::state::{PlaybackTarget, RecordingState};

/// User intents consumed by [`Recorder::dispatch`](crate::session::recorder::Recorder::dispatch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    StartRecording,
    StopRecording,
    /// Start when idle, stop when recording.
    ToggleRecording,
    /// Play or stop the most recent recording.
    TogglePrimary,
    /// Play the list entry at the index, or stop it if it is already playing.
    PlayEntry(usize),
    StopPlayback,
    DeleteEntry(usize),
    ShareEntry(usize),
    /// Answer from the permission authority to an earlier request.
    PermissionResult { granted: bool },
}

/// Change to the recording list, addressed by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEvent {
    Inserted(usize),
    Removed(usize),
    /// Only this index's display needs refreshing.
    Changed(usize),
    /// The whole collection was replaced.
    Reloaded,
}

/// Notifications emitted by the core to the display surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    List(ListEvent),
    RecordingStateChanged(RecordingState),
    RecordingSaved(RecordingEntry),
    PlaybackStarted {
        target: PlaybackTarget,
        file_path: PathBuf,
    },
    PlaybackStopped {
        target: PlaybackTarget,
    },
    PlaybackCompleted {
        target: PlaybackTarget,
    },
    /// Playback position in percent, 0–100.
    Progress {
        target: PlaybackTarget,
        percent: u8,
    },
    /// Transient, user-visible status text.
    Status(String),
}
