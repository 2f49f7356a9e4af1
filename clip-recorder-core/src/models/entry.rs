use std::path::{Path, PathBuf};

/// One recorded clip in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingEntry {
    pub file_path: PathBuf,
    pub file_name: String,
    /// True only while this entry's playback is active.
    pub is_playing: bool,
}

impl RecordingEntry {
    /// Creates a non-playing entry, deriving the display name from the path.
    pub fn from_path(file_path: impl Into<PathBuf>) -> Self {
        let file_path = file_path.into();
        let file_name = display_name(&file_path);
        Self {
            file_path,
            file_name,
            is_playing: false,
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}
