//! Microphone capture provider.
//!
//! Opens an input stream on the configured (or default) input device and
//! streams every callback buffer into a `WavFileWriter`. The stream is built
//! paused; `begin` starts it and `finalize` drops it before closing the file.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use cpal::traits::{DeviceTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, SampleRate, SizedSample, Stream, StreamConfig};
use parking_lot::Mutex;

use clip_recorder_core::models::config::AudioFormat;
use clip_recorder_core::models::error::RecorderError;
use clip_recorder_core::models::recording_result::CaptureOutput;
use clip_recorder_core::storage::wav_writer::WavFileWriter;
use clip_recorder_core::traits::capture_provider::{ActiveCapture, AudioSource, CaptureProvider};

use crate::device_enumerator;

/// cpal microphone capture.
pub struct MicCapture {
    device_name: Option<String>,
}

impl MicCapture {
    /// Capture from the named input device, or the system default when `None`.
    pub fn new(device_name: Option<String>) -> Self {
        Self { device_name }
    }

    pub fn default_device() -> Self {
        Self::new(None)
    }
}

impl CaptureProvider for MicCapture {
    fn is_available(&self) -> bool {
        device_enumerator::find_input_device(self.device_name.as_deref()).is_some()
    }

    fn open(&mut self, output_path: &Path, format: &AudioFormat) -> Result<Box<dyn ActiveCapture>, RecorderError> {
        let device = device_enumerator::find_input_device(self.device_name.as_deref())
            .ok_or_else(|| RecorderError::DeviceUnavailable("no input device".into()))?;

        let supported = choose_input_config(&device, format)?;
        let sample_format = supported.sample_format();
        let config: StreamConfig = supported.config();
        log::debug!(
            "Input config: {} Hz, {} channels, {:?}",
            config.sample_rate.0,
            config.channels,
            sample_format
        );

        let mut writer = WavFileWriter::new(output_path.to_path_buf());
        writer.open(config.sample_rate.0, config.channels, format.bit_depth)?;

        let shared = CaptureShared {
            writer: Arc::new(Mutex::new(writer)),
            capturing: Arc::new(AtomicBool::new(false)),
            write_error: Arc::new(Mutex::new(None)),
        };

        let stream = match sample_format {
            SampleFormat::F32 => build_input_stream::<f32>(&device, &config, shared.clone()),
            SampleFormat::I16 => build_input_stream::<i16>(&device, &config, shared.clone()),
            SampleFormat::U16 => build_input_stream::<u16>(&device, &config, shared.clone()),
            SampleFormat::I32 => build_input_stream::<i32>(&device, &config, shared.clone()),
            other => Err(RecorderError::DeviceUnavailable(format!(
                "unsupported input sample format: {:?}",
                other
            ))),
        }?;

        Ok(Box::new(MicRecording { stream, shared }))
    }

    fn device_info(&self) -> AudioSource {
        let name = device_enumerator::find_input_device(self.device_name.as_deref())
            .and_then(|d| d.name().ok())
            .unwrap_or_else(|| "Default Microphone".into());
        AudioSource {
            id: name.clone(),
            name,
            is_default: self.device_name.is_none(),
        }
    }
}

/// State shared between the cpal callback and the controlling thread.
#[derive(Clone)]
struct CaptureShared {
    writer: Arc<Mutex<WavFileWriter>>,
    capturing: Arc<AtomicBool>,
    write_error: Arc<Mutex<Option<RecorderError>>>,
}

/// An open input stream writing into a WAV file. Dropping it stops the
/// stream and releases the device.
struct MicRecording {
    stream: Stream,
    shared: CaptureShared,
}

impl ActiveCapture for MicRecording {
    fn begin(&mut self) -> Result<(), RecorderError> {
        self.shared.capturing.store(true, Ordering::SeqCst);
        self.stream
            .play()
            .map_err(|e| RecorderError::DeviceUnavailable(format!("failed to start input stream: {}", e)))
    }

    fn finalize(self: Box<Self>) -> Result<CaptureOutput, RecorderError> {
        let MicRecording { stream, shared } = *self;
        shared.capturing.store(false, Ordering::SeqCst);
        drop(stream);

        if let Some(e) = shared.write_error.lock().take() {
            return Err(e);
        }
        let output = shared.writer.lock().close()?;
        Ok(output)
    }
}

/// Prefer a config with the requested channels and rate, then any config
/// with the requested rate, then the device default.
fn choose_input_config(
    device: &cpal::Device,
    format: &AudioFormat,
) -> Result<cpal::SupportedStreamConfig, RecorderError> {
    let target = format.sample_rate;
    if let Ok(configs) = device.supported_input_configs() {
        let ranges: Vec<_> = configs
            .filter(|c| c.min_sample_rate().0 <= target && target <= c.max_sample_rate().0)
            .collect();
        let chosen = ranges
            .iter()
            .find(|c| c.channels() == format.channels)
            .or_else(|| ranges.first());
        if let Some(range) = chosen {
            return Ok(range.clone().with_sample_rate(SampleRate(target)));
        }
    }

    log::info!("No input config at {} Hz, using device default", target);
    device
        .default_input_config()
        .map_err(|e| RecorderError::DeviceUnavailable(format!("failed to get input config: {}", e)))
}

fn build_input_stream<T>(
    device: &cpal::Device,
    config: &StreamConfig,
    shared: CaptureShared,
) -> Result<Stream, RecorderError>
where
    T: Sample + SizedSample + Send + 'static,
    f32: FromSample<T>,
{
    let err_fn = |err| {
        log::error!("Input stream error: {}", err);
    };

    device
        .build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                if !shared.capturing.load(Ordering::SeqCst) {
                    return;
                }
                let samples: Vec<f32> = data.iter().map(|s| f32::from_sample(*s)).collect();
                if let Err(e) = shared.writer.lock().write_samples(&samples) {
                    log::error!("Failed to write audio data: {}", e);
                    shared.capturing.store(false, Ordering::SeqCst);
                    *shared.write_error.lock() = Some(e);
                }
            },
            err_fn,
            None,
        )
        .map_err(|e| RecorderError::DeviceUnavailable(format!("failed to build input stream: {}", e)))
}
