//! WAV playback provider.
//!
//! Decodes the whole clip up front, converts it to the output device's
//! layout, and feeds it to an output stream from a lock-free cursor. The
//! cursor doubles as the position and completion source polled by the
//! playback coordinator.

use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use cpal::traits::{DeviceTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, SampleRate, SizedSample, Stream, StreamConfig};

use clip_recorder_core::models::error::RecorderError;
use clip_recorder_core::processing::sample_converter::SampleConverter;
use clip_recorder_core::traits::playback_provider::{ActivePlayback, PlaybackProvider};

use crate::decoder::{decode_wav, DecodedClip};
use crate::device_enumerator;

/// cpal WAV player.
pub struct WavPlayer {
    device_name: Option<String>,
}

impl WavPlayer {
    /// Play on the named output device, or the system default when `None`.
    pub fn new(device_name: Option<String>) -> Self {
        Self { device_name }
    }

    pub fn default_device() -> Self {
        Self::new(None)
    }
}

impl PlaybackProvider for WavPlayer {
    fn open(&mut self, path: &Path) -> Result<Box<dyn ActivePlayback>, RecorderError> {
        if !path.exists() {
            return Err(RecorderError::FileNotFound(path.to_path_buf()));
        }
        let clip = decode_wav(path)?;

        let device = device_enumerator::find_output_device(self.device_name.as_deref())
            .ok_or_else(|| RecorderError::DeviceUnavailable("no output device".into()))?;
        let supported = choose_output_config(&device, &clip)?;
        let sample_format = supported.sample_format();
        let config: StreamConfig = supported.config();

        let converter = SampleConverter::new(config.sample_rate.0, config.channels);
        let cursor = Arc::new(PlaybackCursor {
            samples: converter.convert(&clip.samples, clip.channels, clip.sample_rate),
            next: AtomicUsize::new(0),
            finished: AtomicBool::new(false),
        });

        let stream = match sample_format {
            SampleFormat::F32 => build_output_stream::<f32>(&device, &config, cursor.clone()),
            SampleFormat::I16 => build_output_stream::<i16>(&device, &config, cursor.clone()),
            SampleFormat::U16 => build_output_stream::<u16>(&device, &config, cursor.clone()),
            SampleFormat::I32 => build_output_stream::<i32>(&device, &config, cursor.clone()),
            other => Err(RecorderError::DeviceUnavailable(format!(
                "unsupported output sample format: {:?}",
                other
            ))),
        }?;

        log::debug!(
            "Opened {} ({:.2}s) on {} Hz / {} channels",
            path.display(),
            clip.duration().as_secs_f64(),
            config.sample_rate.0,
            config.channels
        );

        Ok(Box::new(WavPlayback {
            stream,
            cursor,
            duration: clip.duration(),
            output_rate: config.sample_rate.0,
            output_channels: config.channels,
        }))
    }
}

/// Converted samples and the index of the next one to play.
struct PlaybackCursor {
    samples: Vec<f32>,
    next: AtomicUsize,
    finished: AtomicBool,
}

/// An open output stream. Dropping it stops playback and releases the device.
struct WavPlayback {
    stream: Stream,
    cursor: Arc<PlaybackCursor>,
    duration: Duration,
    output_rate: u32,
    output_channels: u16,
}

impl ActivePlayback for WavPlayback {
    fn begin(&mut self) -> Result<(), RecorderError> {
        self.stream
            .play()
            .map_err(|e| RecorderError::DeviceUnavailable(format!("failed to start output stream: {}", e)))
    }

    fn position(&self) -> Duration {
        let played = self.cursor.next.load(Ordering::SeqCst);
        let frames = played / self.output_channels.max(1) as usize;
        if self.output_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(frames as f64 / self.output_rate as f64).min(self.duration)
    }

    fn duration(&self) -> Duration {
        self.duration
    }

    fn is_finished(&self) -> bool {
        self.cursor.finished.load(Ordering::SeqCst)
    }
}

/// Prefer the clip's own channel count and rate; otherwise play through the
/// device default and convert.
fn choose_output_config(
    device: &cpal::Device,
    clip: &DecodedClip,
) -> Result<cpal::SupportedStreamConfig, RecorderError> {
    if let Ok(mut configs) = device.supported_output_configs() {
        let matched = configs.find(|c| {
            c.channels() == clip.channels
                && c.min_sample_rate().0 <= clip.sample_rate
                && clip.sample_rate <= c.max_sample_rate().0
        });
        if let Some(range) = matched {
            return Ok(range.with_sample_rate(SampleRate(clip.sample_rate)));
        }
    }

    device
        .default_output_config()
        .map_err(|e| RecorderError::DeviceUnavailable(format!("failed to get output config: {}", e)))
}

fn build_output_stream<T>(
    device: &cpal::Device,
    config: &StreamConfig,
    cursor: Arc<PlaybackCursor>,
) -> Result<Stream, RecorderError>
where
    T: Sample + SizedSample + FromSample<f32> + Send + 'static,
{
    let err_fn = |err| {
        log::error!("Output stream error: {}", err);
    };

    device
        .build_output_stream(
            config,
            move |out: &mut [T], _: &cpal::OutputCallbackInfo| {
                let start = cursor.next.load(Ordering::SeqCst);
                let remaining = cursor.samples.get(start..).unwrap_or(&[]);
                let len = out.len().min(remaining.len());

                for (slot, sample) in out.iter_mut().zip(&remaining[..len]) {
                    *slot = T::from_sample(*sample);
                }
                out[len..].fill(T::EQUILIBRIUM);

                cursor.next.store(start + len, Ordering::SeqCst);
                if start + len >= cursor.samples.len() {
                    cursor.finished.store(true, Ordering::SeqCst);
                }
            },
            err_fn,
            None,
        )
        .map_err(|e| RecorderError::DeviceUnavailable(format!("failed to build output stream: {}", e)))
}
