use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavSpec, WavWriter};
use sha2::{Digest, Sha256};

use crate::models::error::RecorderError;
use crate::models::recording_result::CaptureOutput;
use crate::processing::sample_converter;

/// Streaming integer PCM WAV writer.
///
/// hound writes the RIFF header on open and patches its sizes on close.
/// Protect with a `Mutex` when the audio callback and the controlling
/// thread share it.
pub struct WavFileWriter {
    file_path: PathBuf,
    writer: Option<WavWriter<BufWriter<File>>>,
    sample_rate: u32,
    bit_depth: u16,
}

impl WavFileWriter {
    pub fn new(file_path: PathBuf) -> Self {
        Self {
            file_path,
            writer: None,
            sample_rate: 0,
            bit_depth: 16,
        }
    }

    /// Create the file, and its parent directory if needed.
    pub fn open(&mut self, sample_rate: u32, channels: u16, bit_depth: u16) -> Result<(), RecorderError> {
        if self.writer.is_some() {
            return Ok(());
        }

        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| RecorderError::StorageError(format!("failed to create directory: {}", e)))?;
        }

        let spec = WavSpec {
            channels,
            sample_rate,
            bits_per_sample: bit_depth,
            sample_format: SampleFormat::Int,
        };
        let writer = WavWriter::create(&self.file_path, spec)
            .map_err(|e| RecorderError::StorageError(format!("failed to create file: {}", e)))?;
        self.writer = Some(writer);
        self.sample_rate = sample_rate;
        self.bit_depth = bit_depth;
        Ok(())
    }

    /// Append normalized interleaved samples at the file's bit depth.
    pub fn write_samples(&mut self, samples: &[f32]) -> Result<(), RecorderError> {
        let bit_depth = self.bit_depth;
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| RecorderError::StorageError("file is not open".into()))?;
        for &sample in samples {
            writer
                .write_sample(sample_converter::pcm_value(sample, bit_depth))
                .map_err(|e| RecorderError::StorageError(format!("write failed: {}", e)))?;
        }
        Ok(())
    }

    /// Finalize the file and compute its SHA-256 checksum.
    pub fn close(&mut self) -> Result<CaptureOutput, RecorderError> {
        let writer = self
            .writer
            .take()
            .ok_or_else(|| RecorderError::StorageError("file is not open".into()))?;
        let frames = writer.duration();
        writer
            .finalize()
            .map_err(|e| RecorderError::StorageError(format!("failed to finalize: {}", e)))?;

        let checksum = sha256_file(&self.file_path)?;
        let duration_secs = if self.sample_rate == 0 {
            0.0
        } else {
            frames as f64 / self.sample_rate as f64
        };
        Ok(CaptureOutput {
            file_path: self.file_path.clone(),
            duration_secs,
            checksum,
        })
    }
}

/// Compute SHA-256 hex digest of a file.
fn sha256_file(path: &Path) -> Result<String, RecorderError> {
    let data = fs::read(path)
        .map_err(|e| RecorderError::StorageError(format!("failed to read file for checksum: {}", e)))?;
    let digest = Sha256::digest(&data);
    Ok(digest.iter().map(|b| format!("{:02x}", b)).collect())
}
