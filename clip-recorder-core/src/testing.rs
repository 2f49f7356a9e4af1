//! In-memory devices and observers for unit tests.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::models::config::AudioFormat;
use crate::models::error::RecorderError;
use crate::models::events::Notification;
use crate::models::recording_result::CaptureOutput;
use crate::storage::wav_writer::WavFileWriter;
use crate::traits::capture_provider::{ActiveCapture, AudioSource, CaptureProvider};
use crate::traits::permission::{PermissionAuthority, PermissionStatus};
use crate::traits::playback_provider::{ActivePlayback, PlaybackProvider};
use crate::traits::recorder_delegate::RecorderDelegate;
use crate::traits::share_target::ShareTarget;

/// Ordered log of device calls, shared between a fake and its test.
#[derive(Debug, Clone, Default)]
pub struct SharedLog(Arc<Mutex<Vec<String>>>);

impl SharedLog {
    pub fn push(&self, line: impl Into<String>) {
        self.0.lock().push(line.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().clone()
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

pub struct FakeCapture {
    log: SharedLog,
    pub available: bool,
    pub fail_open: bool,
    pub fail_begin: bool,
    pub fail_finalize: bool,
}

impl FakeCapture {
    pub fn new(log: SharedLog) -> Self {
        Self {
            log,
            available: true,
            fail_open: false,
            fail_begin: false,
            fail_finalize: false,
        }
    }
}

impl CaptureProvider for FakeCapture {
    fn is_available(&self) -> bool {
        self.available
    }

    fn open(&mut self, output_path: &Path, format: &AudioFormat) -> Result<Box<dyn ActiveCapture>, RecorderError> {
        if self.fail_open {
            return Err(RecorderError::DeviceUnavailable("device busy".into()));
        }
        let mut writer = WavFileWriter::new(output_path.to_path_buf());
        writer.open(format.sample_rate, format.channels, format.bit_depth)?;
        self.log.push("capture:open");
        Ok(Box::new(FakeActiveCapture {
            log: self.log.clone(),
            writer,
            fail_begin: self.fail_begin,
            fail_finalize: self.fail_finalize,
        }))
    }

    fn device_info(&self) -> AudioSource {
        AudioSource {
            id: "fake-mic".into(),
            name: "Fake Microphone".into(),
            is_default: true,
        }
    }
}

struct FakeActiveCapture {
    log: SharedLog,
    writer: WavFileWriter,
    fail_begin: bool,
    fail_finalize: bool,
}

impl ActiveCapture for FakeActiveCapture {
    fn begin(&mut self) -> Result<(), RecorderError> {
        if self.fail_begin {
            return Err(RecorderError::DeviceUnavailable("device busy".into()));
        }
        self.log.push("capture:begin");
        Ok(())
    }

    fn finalize(mut self: Box<Self>) -> Result<CaptureOutput, RecorderError> {
        self.log.push("capture:finalize");
        if self.fail_finalize {
            return Err(RecorderError::StorageError("disk full".into()));
        }
        self.writer.write_samples(&[0.0, 0.25, -0.25, 0.0])?;
        self.writer.close()
    }
}

impl Drop for FakeActiveCapture {
    fn drop(&mut self) {
        self.log.push("capture:release");
    }
}

/// Playback position and completion shared by every fake player.
#[derive(Debug, Clone, Default)]
pub struct Transport(Arc<Mutex<(Duration, bool)>>);

impl Transport {
    pub fn set_position(&self, position: Duration) {
        self.0.lock().0 = position;
    }

    pub fn finish(&self) {
        self.0.lock().1 = true;
    }

    fn reset(&self) {
        *self.0.lock() = (Duration::ZERO, false);
    }
}

pub struct FakePlayer {
    log: SharedLog,
    transport: Transport,
    /// File names that fail to open as `Unplayable`.
    pub unplayable: HashSet<String>,
}

impl FakePlayer {
    pub fn new(log: SharedLog) -> Self {
        Self {
            log,
            transport: Transport::default(),
            unplayable: HashSet::new(),
        }
    }

    pub fn transport(&self) -> Transport {
        self.transport.clone()
    }
}

impl PlaybackProvider for FakePlayer {
    fn open(&mut self, path: &Path) -> Result<Box<dyn ActivePlayback>, RecorderError> {
        let name = file_name(path);
        if !path.exists() {
            return Err(RecorderError::FileNotFound(path.to_path_buf()));
        }
        if self.unplayable.contains(&name) {
            return Err(RecorderError::Unplayable(name));
        }
        self.transport.reset();
        self.log.push(format!("play:open {}", name));
        Ok(Box::new(FakePlayback {
            log: self.log.clone(),
            transport: self.transport.clone(),
            name,
        }))
    }
}

struct FakePlayback {
    log: SharedLog,
    transport: Transport,
    name: String,
}

impl ActivePlayback for FakePlayback {
    fn begin(&mut self) -> Result<(), RecorderError> {
        self.log.push(format!("play:begin {}", self.name));
        Ok(())
    }

    fn position(&self) -> Duration {
        self.transport.0.lock().0
    }

    fn duration(&self) -> Duration {
        Duration::from_secs(1)
    }

    fn is_finished(&self) -> bool {
        self.transport.0.lock().1
    }
}

impl Drop for FakePlayback {
    fn drop(&mut self) {
        self.log.push(format!("play:release {}", self.name));
    }
}

/// Authority that starts undetermined and counts requests.
#[derive(Debug, Default)]
pub struct PromptPermission {
    pub requests: usize,
    answer: Option<bool>,
}

impl PermissionAuthority for PromptPermission {
    fn status(&self) -> PermissionStatus {
        match self.answer {
            None => PermissionStatus::NotDetermined,
            Some(true) => PermissionStatus::Granted,
            Some(false) => PermissionStatus::Denied,
        }
    }

    fn request(&mut self) {
        self.requests += 1;
    }

    fn resolve(&mut self, granted: bool) {
        self.answer = Some(granted);
    }
}

pub struct FakeShare {
    log: SharedLog,
}

impl FakeShare {
    pub fn new(log: SharedLog) -> Self {
        Self { log }
    }
}

impl ShareTarget for FakeShare {
    fn share(&self, path: &Path) -> Result<(), RecorderError> {
        self.log.push(file_name(path));
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct CollectingDelegate {
    notifications: Mutex<Vec<Notification>>,
}

impl CollectingDelegate {
    pub fn contains(&self, notification: &Notification) -> bool {
        self.notifications.lock().contains(notification)
    }
}

impl RecorderDelegate for CollectingDelegate {
    fn notify(&self, notification: &Notification) {
        self.notifications.lock().push(notification.clone());
    }
}
