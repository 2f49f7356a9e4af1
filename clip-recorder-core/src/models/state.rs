use std::path::PathBuf;

/// Recording session state machine.
///
/// ```text
/// idle ⇄ recording
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RecordingState {
    #[default]
    Idle,
    Recording { file_path: PathBuf },
}

impl RecordingState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_recording(&self) -> bool {
        matches!(self, Self::Recording { .. })
    }

    /// Output path of the active recording, if any.
    pub fn file_path(&self) -> Option<&PathBuf> {
        match self {
            Self::Recording { file_path } => Some(file_path),
            Self::Idle => None,
        }
    }
}

/// What a playback session is playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaybackTarget {
    /// The quick-play transport for the most recent recording.
    Primary,
    /// An entry in the recording list, by index.
    List(usize),
}

impl PlaybackTarget {
    pub fn list_index(&self) -> Option<usize> {
        match self {
            Self::List(index) => Some(*index),
            Self::Primary => None,
        }
    }
}

/// Playback state as seen by observers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing {
        target: PlaybackTarget,
        file_path: PathBuf,
    },
}

impl PlaybackState {
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing { .. })
    }

    pub fn target(&self) -> Option<PlaybackTarget> {
        match self {
            Self::Playing { target, .. } => Some(*target),
            Self::Idle => None,
        }
    }
}
