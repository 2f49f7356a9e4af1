use std::path::Path;

use crate::models::config::AudioFormat;
use crate::models::error::RecorderError;
use crate::models::recording_result::CaptureOutput;

/// Description of an audio device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSource {
    pub id: String,
    pub name: String,
    pub is_default: bool,
}

/// Interface for platform-specific microphone capture.
///
/// Implemented by `MicCapture` (cpal) and by the fakes used in tests.
pub trait CaptureProvider {
    /// Whether an input device is currently present.
    fn is_available(&self) -> bool;

    /// Open the capture device, writing to `output_path`.
    ///
    /// Fails with `DeviceUnavailable` when the device is busy or missing.
    fn open(
        &mut self,
        output_path: &Path,
        format: &AudioFormat,
    ) -> Result<Box<dyn ActiveCapture>, RecorderError>;

    /// Information about the device backing this provider.
    fn device_info(&self) -> AudioSource;
}

/// An opened capture device. Dropping it releases the device.
pub trait ActiveCapture {
    /// Begin delivering audio into the output file.
    fn begin(&mut self) -> Result<(), RecorderError>;

    /// Stop capturing and finalize the output file.
    fn finalize(self: Box<Self>) -> Result<CaptureOutput, RecorderError>;
}
