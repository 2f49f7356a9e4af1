//! # clip-recorder-cpal
//!
//! Desktop audio backend for clip-recorder, built on cpal and hound.
//!
//! Provides:
//! - `MicCapture`: microphone capture into a 16-bit PCM WAV file
//! - `WavPlayer`: WAV playback on the default (or named) output device
//! - `device_enumerator`: input/output device listing and lookup by name
//! - `permissions`: microphone access probe
//!
//! ## Usage
//! ```ignore
//! use clip_recorder_core::{Recorder, RecorderConfig, StaticPermission};
//! use clip_recorder_cpal::{MicCapture, WavPlayer};
//!
//! let config = RecorderConfig::default();
//! let recorder = Recorder::new(
//!     config.clone(),
//!     Box::new(MicCapture::new(config.input_device.clone())),
//!     Box::new(WavPlayer::default_device()),
//!     Box::new(StaticPermission::granted()),
//!     share_target,
//! )?;
//! ```

pub mod decoder;
pub mod device_enumerator;
pub mod mic_capture;
pub mod permissions;
pub mod wav_player;

pub use decoder::{decode_wav, DecodeError, DecodedClip};
pub use mic_capture::MicCapture;
pub use wav_player::WavPlayer;
