use std::path::PathBuf;

/// Result returned when a capture device finalizes a recording.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureOutput {
    pub file_path: PathBuf,
    pub duration_secs: f64,
    /// SHA-256 hex digest of the finalized file.
    pub checksum: String,
}
