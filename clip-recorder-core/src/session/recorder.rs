use std::sync::Arc;
use std::time::Instant;

use crate::models::config::RecorderConfig;
use crate::models::entry::RecordingEntry;
use crate::models::error::RecorderError;
use crate::models::events::{Command, ListEvent, Notification};
use crate::models::state::{PlaybackState, RecordingState};
use crate::session::playback::PlaybackCoordinator;
use crate::session::recording::RecordingController;
use crate::storage::list_store::RecordingListStore;
use crate::traits::capture_provider::{AudioSource, CaptureProvider};
use crate::traits::permission::PermissionAuthority;
use crate::traits::playback_provider::PlaybackProvider;
use crate::traits::recorder_delegate::RecorderDelegate;
use crate::traits::share_target::ShareTarget;

/// Owns the clip list, the recording controller, the playback coordinator,
/// and the devices they drive.
///
/// Front ends feed it [`Command`]s and call [`tick`](Self::tick) from their
/// event loop; every resulting [`Notification`] is delivered to the
/// delegate before the call returns.
pub struct Recorder {
    config: RecorderConfig,
    store: RecordingListStore,
    recording: RecordingController,
    playback: PlaybackCoordinator,
    capture: Box<dyn CaptureProvider>,
    player: Box<dyn PlaybackProvider>,
    permissions: Box<dyn PermissionAuthority>,
    share: Box<dyn ShareTarget>,
    delegate: Option<Arc<dyn RecorderDelegate>>,
}

impl Recorder {
    pub fn new(
        config: RecorderConfig,
        capture: Box<dyn CaptureProvider>,
        player: Box<dyn PlaybackProvider>,
        permissions: Box<dyn PermissionAuthority>,
        share: Box<dyn ShareTarget>,
    ) -> Result<Self, RecorderError> {
        config.validate().map_err(RecorderError::ConfigurationFailed)?;

        Ok(Self {
            store: RecordingListStore::new(config.recordings_dir.clone(), config.extension.clone()),
            recording: RecordingController::new(),
            playback: PlaybackCoordinator::new(config.list_progress_interval(), config.primary_progress_interval()),
            config,
            capture,
            player,
            permissions,
            share,
            delegate: None,
        })
    }

    pub fn set_delegate(&mut self, delegate: Arc<dyn RecorderDelegate>) {
        self.delegate = Some(delegate);
    }

    /// Load the recordings directory and ask for microphone permission if
    /// it has not been granted yet.
    pub fn startup(&mut self) -> Result<(), RecorderError> {
        self.load()?;
        if !self.permissions.status().is_granted() {
            self.permissions.request();
        }
        Ok(())
    }

    /// Replace the list with the recordings on disk.
    ///
    /// Fails with `InvalidState` while recording, since the file being
    /// written is already on disk.
    pub fn load(&mut self) -> Result<(), RecorderError> {
        if self.recording.is_recording() {
            return Err(RecorderError::InvalidState("cannot reload while recording".into()));
        }
        let mut out = Vec::new();
        self.playback.stop(&mut self.store, &mut out);
        let result = self.store.load().map(|event| out.push(Notification::List(event)));
        self.emit(out);
        result
    }

    /// Handle one user intent at the current time.
    pub fn dispatch(&mut self, command: Command) -> Result<(), RecorderError> {
        self.dispatch_at(command, Instant::now())
    }

    /// Handle one user intent. Failures are reported to the delegate as
    /// status text and returned.
    pub fn dispatch_at(&mut self, command: Command, now: Instant) -> Result<(), RecorderError> {
        let mut out = Vec::new();
        let result = self.handle(&command, now, &mut out);
        if let Err(ref e) = result {
            log::warn!("{:?} failed: {}", command, e);
            out.push(Notification::Status(failure_status(&command, e)));
        }
        self.emit(out);
        result
    }

    /// Drive playback completion and progress polling.
    pub fn tick(&mut self, now: Instant) {
        let mut out = Vec::new();
        self.playback.tick(&mut self.store, now, &mut out);
        self.emit(out);
    }

    pub fn entries(&self) -> &[RecordingEntry] {
        self.store.entries()
    }

    pub fn recording_state(&self) -> &RecordingState {
        self.recording.state()
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.playback.state()
    }

    /// Index of the list entry being played, if any.
    pub fn playing_index(&self) -> Option<usize> {
        self.playback.playing_index()
    }

    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    /// The microphone recordings are captured from.
    pub fn capture_device(&self) -> AudioSource {
        self.capture.device_info()
    }

    fn handle(&mut self, command: &Command, now: Instant, out: &mut Vec<Notification>) -> Result<(), RecorderError> {
        match command {
            Command::StartRecording => self.start_recording(out),
            Command::StopRecording => self.stop_recording(out),
            Command::ToggleRecording => {
                if self.recording.is_recording() {
                    self.stop_recording(out)
                } else {
                    self.start_recording(out)
                }
            }
            Command::TogglePrimary => self.playback.toggle_primary(
                self.recording.last_recording(),
                &mut self.store,
                self.player.as_mut(),
                now,
                out,
            ),
            Command::PlayEntry(index) => {
                self.playback
                    .play_entry(*index, &mut self.store, self.player.as_mut(), now, out)
            }
            Command::StopPlayback => {
                self.playback.stop(&mut self.store, out);
                Ok(())
            }
            Command::DeleteEntry(index) => self.delete(*index, out),
            Command::ShareEntry(index) => self.share(*index, out),
            Command::PermissionResult { granted } => {
                self.permissions.resolve(*granted);
                let text = if *granted { "Permission granted" } else { "Permission denied" };
                out.push(Notification::Status(text.into()));
                Ok(())
            }
        }
    }

    fn start_recording(&mut self, out: &mut Vec<Notification>) -> Result<(), RecorderError> {
        self.recording.start(
            self.permissions.as_mut(),
            self.capture.as_mut(),
            &self.config.recordings_dir,
            &self.config.extension,
            &self.config.audio_format,
        )?;
        out.push(Notification::RecordingStateChanged(self.recording.state().clone()));
        out.push(Notification::Status("Recording started".into()));
        Ok(())
    }

    fn stop_recording(&mut self, out: &mut Vec<Notification>) -> Result<(), RecorderError> {
        let was_recording = self.recording.is_recording();
        let result = self.recording.stop(&mut self.store);
        if was_recording {
            out.push(Notification::RecordingStateChanged(self.recording.state().clone()));
        }
        let saved = result?;
        out.push(Notification::List(saved.event));
        out.push(Notification::RecordingSaved(saved.entry));
        out.push(Notification::Status("Recording saved".into()));
        Ok(())
    }

    fn delete(&mut self, index: usize, out: &mut Vec<Notification>) -> Result<(), RecorderError> {
        let file_path = self
            .store
            .get(index)
            .map(|entry| entry.file_path.clone())
            .ok_or(RecorderError::InvalidIndex(index))?;

        if self.playback.playing_index() == Some(index) || self.playback.playing_file() == Some(file_path.as_path()) {
            self.playback.stop(&mut self.store, out);
        }

        let (entry, event) = self.store.remove(index)?;
        self.playback.entry_removed(index);
        self.recording.forget(&entry.file_path);

        log::info!("Deleted recording {}", entry.file_path.display());
        out.push(Notification::List(event));
        out.push(Notification::Status("Recording deleted".into()));
        Ok(())
    }

    fn share(&mut self, index: usize, out: &mut Vec<Notification>) -> Result<(), RecorderError> {
        let entry = self.store.get(index).ok_or(RecorderError::InvalidIndex(index))?;
        if !entry.file_path.exists() {
            return Err(RecorderError::FileNotFound(entry.file_path.clone()));
        }
        self.share.share(&entry.file_path)?;
        out.push(Notification::Status(format!("Shared {}", entry.file_name)));
        Ok(())
    }

    fn emit(&self, notifications: Vec<Notification>) {
        if let Some(ref delegate) = self.delegate {
            for notification in &notifications {
                delegate.notify(notification);
            }
        }
    }
}

/// User-visible text for a failed command.
fn failure_status(command: &Command, error: &RecorderError) -> String {
    match (command, error) {
        (_, RecorderError::PermissionDenied) => "Microphone permission required".into(),
        (Command::StartRecording | Command::ToggleRecording, RecorderError::DeviceUnavailable(_)) => {
            "Recording failed".into()
        }
        (Command::StopRecording | Command::ToggleRecording, RecorderError::StorageError(_)) => {
            "Recording failed".into()
        }
        (Command::TogglePrimary, RecorderError::NoRecording | RecorderError::FileNotFound(_)) => {
            "No recording found to play".into()
        }
        (Command::TogglePrimary | Command::PlayEntry(_), _) => format!("Playback failed: {}", error),
        _ => error.to_string(),
    }
}

impl std::fmt::Debug for Recorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recorder")
            .field("recordings_dir", &self.config.recordings_dir)
            .field("entries", &self.store.len())
            .field("recording", self.recording.state())
            .field("playback", &self.playback.state())
            .finish()
    }
}
