use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use super::error::RecorderError;

/// PCM format requested from the capture device.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct AudioFormat {
    /// Preferred sample rate in Hz (default: 44100). Backends may fall back
    /// to the device's native rate.
    pub sample_rate: u32,

    /// Preferred channel count (default: 1).
    pub channels: u16,

    /// Bit depth for PCM output (default: 16). Valid values: 16, 24, 32.
    pub bit_depth: u16,
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            channels: 1,
            bit_depth: 16,
        }
    }
}

/// Recorder configuration.
///
/// Every field has a default, so a config file only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RecorderConfig {
    /// Directory scanned at startup and where new recordings are written.
    pub recordings_dir: PathBuf,

    /// File extension of recordings, without the dot (default: "wav").
    pub extension: String,

    pub audio_format: AudioFormat,

    /// Progress poll period for list playback (default: 500 ms).
    pub list_progress_interval_ms: u64,

    /// Progress poll period for primary playback (default: 100 ms).
    pub primary_progress_interval_ms: u64,

    /// Specific input device name, or None for the system default.
    pub input_device: Option<String>,

    /// Where shared clips are exported, or None to share in place.
    pub export_dir: Option<PathBuf>,
}

impl RecorderConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.extension.is_empty() || self.extension.contains(&['.', '/', '\\'][..]) {
            return Err(format!("invalid recording extension: {:?}", self.extension));
        }
        if self.audio_format.sample_rate == 0 {
            return Err("sample rate must be positive".into());
        }
        if ![16, 24, 32].contains(&self.audio_format.bit_depth) {
            return Err(format!("unsupported bit depth: {}", self.audio_format.bit_depth));
        }
        if ![1, 2].contains(&self.audio_format.channels) {
            return Err(format!("unsupported channel count: {}", self.audio_format.channels));
        }
        if self.list_progress_interval_ms == 0 || self.primary_progress_interval_ms == 0 {
            return Err("progress intervals must be positive".into());
        }
        Ok(())
    }

    /// Load and validate a JSON config file.
    pub fn from_json_file(path: &Path) -> Result<Self, RecorderError> {
        let json = fs::read_to_string(path).map_err(|e| {
            RecorderError::ConfigurationFailed(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config: Self = serde_json::from_str(&json).map_err(|e| {
            RecorderError::ConfigurationFailed(format!("failed to parse {}: {}", path.display(), e))
        })?;
        config.validate().map_err(RecorderError::ConfigurationFailed)?;
        Ok(config)
    }

    pub fn list_progress_interval(&self) -> Duration {
        Duration::from_millis(self.list_progress_interval_ms)
    }

    pub fn primary_progress_interval(&self) -> Duration {
        Duration::from_millis(self.primary_progress_interval_ms)
    }
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            recordings_dir: PathBuf::from("recordings"),
            extension: "wav".into(),
            audio_format: AudioFormat::default(),
            list_progress_interval_ms: 500,
            primary_progress_interval_ms: 100,
            input_device: None,
            export_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(RecorderConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_dotted_extension() {
        let config = RecorderConfig {
            extension: ".wav".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_unsupported_bit_depth() {
        let config = RecorderConfig {
            audio_format: AudioFormat {
                bit_depth: 12,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "recordings_dir": "/data/clips", "list_progress_interval_ms": 250 }"#).unwrap();

        let config = RecorderConfig::from_json_file(&path).unwrap();
        assert_eq!(config.recordings_dir, PathBuf::from("/data/clips"));
        assert_eq!(config.list_progress_interval(), Duration::from_millis(250));
        assert_eq!(config.extension, "wav");
        assert_eq!(config.primary_progress_interval_ms, 100);
    }

    #[test]
    fn invalid_json_is_a_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let err = RecorderConfig::from_json_file(&path).unwrap_err();
        assert!(matches!(err, RecorderError::ConfigurationFailed(_)));
    }
}
