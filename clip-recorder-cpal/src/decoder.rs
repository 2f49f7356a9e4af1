//! WAV decoding to normalized f32 samples.

use std::path::Path;
use std::time::Duration;

use thiserror::Error;

use clip_recorder_core::models::error::RecorderError;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to open wav: {0}")]
    Open(#[source] hound::Error),

    #[error("failed to read samples: {0}")]
    Samples(#[source] hound::Error),

    #[error("unsupported format: {bits}-bit {format:?}")]
    Unsupported { bits: u16, format: hound::SampleFormat },
}

impl From<DecodeError> for RecorderError {
    fn from(e: DecodeError) -> Self {
        RecorderError::Unplayable(e.to_string())
    }
}

/// A whole clip in memory, interleaved.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedClip {
    pub samples: Vec<f32>,
    pub channels: u16,
    pub sample_rate: u32,
}

impl DecodedClip {
    pub fn frame_count(&self) -> usize {
        self.samples.len() / self.channels.max(1) as usize
    }

    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frame_count() as f64 / self.sample_rate as f64)
    }
}

/// Read a PCM or float WAV file into normalized f32 samples.
pub fn decode_wav(path: &Path) -> Result<DecodedClip, DecodeError> {
    let reader = hound::WavReader::open(path).map_err(DecodeError::Open)?;
    let spec = reader.spec();

    let samples = match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Float, 32) => reader
            .into_samples::<f32>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(DecodeError::Samples)?,
        (hound::SampleFormat::Int, bits @ (8 | 16 | 24 | 32)) => {
            let scale = 1.0 / (1i64 << (bits - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 * scale))
                .collect::<Result<Vec<_>, _>>()
                .map_err(DecodeError::Samples)?
        }
        (format, bits) => return Err(DecodeError::Unsupported { bits, format }),
    };

    Ok(DecodedClip {
        samples,
        channels: spec.channels,
        sample_rate: spec.sample_rate,
    })
}
