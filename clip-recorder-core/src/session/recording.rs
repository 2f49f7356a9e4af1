use std::fs;
use std::path::{Path, PathBuf};

use crate::models::config::AudioFormat;
use crate::models::entry::RecordingEntry;
use crate::models::error::RecorderError;
use crate::models::events::ListEvent;
use crate::models::recording_result::CaptureOutput;
use crate::models::state::RecordingState;
use crate::storage::list_store::RecordingListStore;
use crate::storage::naming;
use crate::traits::capture_provider::{ActiveCapture, CaptureProvider};
use crate::traits::permission::PermissionAuthority;

/// What a successful `stop` produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedRecording {
    pub entry: RecordingEntry,
    pub event: ListEvent,
    pub output: CaptureOutput,
}

/// Sequences start/stop of the single active recording.
///
/// State transitions:
/// ```text
/// idle → recording → idle
/// ```
/// A failed start or a failed finalize leaves the controller idle.
#[derive(Default)]
pub struct RecordingController {
    state: RecordingState,
    capture: Option<Box<dyn ActiveCapture>>,
    last_recording: Option<PathBuf>,
}

impl RecordingController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RecordingState {
        &self.state
    }

    pub fn is_recording(&self) -> bool {
        self.state.is_recording()
    }

    /// Most recent recording saved by this controller.
    pub fn last_recording(&self) -> Option<&Path> {
        self.last_recording.as_deref()
    }

    /// Forget `path` as the last recording, e.g. after it was deleted.
    pub fn forget(&mut self, path: &Path) {
        if self.last_recording.as_deref() == Some(path) {
            self.last_recording = None;
        }
    }

    /// Open the capture device and begin recording into a new timestamped file.
    ///
    /// Without microphone permission the authority is asked for it and the
    /// call fails with `PermissionDenied`.
    pub fn start(
        &mut self,
        permissions: &mut dyn PermissionAuthority,
        provider: &mut dyn CaptureProvider,
        dir: &Path,
        extension: &str,
        format: &AudioFormat,
    ) -> Result<PathBuf, RecorderError> {
        if self.state.is_recording() {
            return Err(RecorderError::InvalidState("already recording".into()));
        }

        if !permissions.status().is_granted() {
            permissions.request();
            return Err(RecorderError::PermissionDenied);
        }

        if !provider.is_available() {
            return Err(RecorderError::DeviceUnavailable(format!(
                "{} is not available",
                provider.device_info().name
            )));
        }

        let file_path = unique_path(naming::new_recording_path(dir, extension));

        let mut capture = provider.open(&file_path, format).map_err(|e| {
            discard_partial(&file_path);
            e
        })?;
        if let Err(e) = capture.begin() {
            drop(capture);
            discard_partial(&file_path);
            return Err(e);
        }

        log::info!("Recording started: {}", file_path.display());
        self.capture = Some(capture);
        self.state = RecordingState::Recording {
            file_path: file_path.clone(),
        };
        Ok(file_path)
    }

    /// Finalize the active recording and append it to the list.
    pub fn stop(&mut self, store: &mut RecordingListStore) -> Result<SavedRecording, RecorderError> {
        let file_path = match std::mem::take(&mut self.state) {
            RecordingState::Recording { file_path } => file_path,
            RecordingState::Idle => return Err(RecorderError::InvalidState("not recording".into())),
        };
        let capture = self
            .capture
            .take()
            .ok_or_else(|| RecorderError::InvalidState("no capture device".into()))?;

        let output = match capture.finalize() {
            Ok(output) => output,
            Err(e) => {
                log::error!("Failed to finalize {}: {}", file_path.display(), e);
                discard_partial(&file_path);
                return Err(e);
            }
        };

        log::info!(
            "Recording saved: {} ({:.1}s, sha256 {})",
            output.file_path.display(),
            output.duration_secs,
            output.checksum
        );

        let entry = RecordingEntry::from_path(output.file_path.clone());
        let event = store.insert(entry.clone());
        self.last_recording = Some(output.file_path.clone());
        Ok(SavedRecording { entry, event, output })
    }
}

/// Avoid overwriting a clip recorded within the same second.
fn unique_path(path: PathBuf) -> PathBuf {
    if !path.exists() {
        return path;
    }
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_string())
        .unwrap_or_default();
    (2..)
        .map(|n| path.with_file_name(format!("{}_{}.{}", stem, n, extension)))
        .find(|candidate| !candidate.exists())
        .unwrap_or(path)
}

fn discard_partial(path: &Path) {
    if path.exists() {
        if let Err(e) = fs::remove_file(path) {
            log::warn!("Failed to remove partial recording {}: {}", path.display(), e);
        }
    }
}
