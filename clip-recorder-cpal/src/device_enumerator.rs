//! Audio device enumeration through the cpal default host.
//!
//! cpal has no stable device IDs, so the device name doubles as the ID.

use cpal::traits::{DeviceTrait, HostTrait};

use clip_recorder_core::models::error::RecorderError;
use clip_recorder_core::traits::capture_provider::AudioSource;

/// List input (microphone) devices.
pub fn list_input_devices() -> Result<Vec<AudioSource>, RecorderError> {
    let host = cpal::default_host();
    let default_name = host.default_input_device().and_then(|d| d.name().ok());
    let devices = host
        .input_devices()
        .map_err(|e| RecorderError::DeviceUnavailable(format!("failed to list input devices: {}", e)))?;
    Ok(devices.filter_map(|d| d.name().ok()).map(|name| source(name, &default_name)).collect())
}

/// List output (speaker/headphone) devices.
pub fn list_output_devices() -> Result<Vec<AudioSource>, RecorderError> {
    let host = cpal::default_host();
    let default_name = host.default_output_device().and_then(|d| d.name().ok());
    let devices = host
        .output_devices()
        .map_err(|e| RecorderError::DeviceUnavailable(format!("failed to list output devices: {}", e)))?;
    Ok(devices.filter_map(|d| d.name().ok()).map(|name| source(name, &default_name)).collect())
}

/// The named input device, falling back to the default when the name is
/// unknown or absent.
pub fn find_input_device(name: Option<&str>) -> Option<cpal::Device> {
    let host = cpal::default_host();
    if let Some(name) = name {
        let found = host
            .input_devices()
            .ok()
            .and_then(|mut devices| devices.find(|d| d.name().map(|n| n == name).unwrap_or(false)));
        if found.is_some() {
            return found;
        }
        log::warn!("Input device '{}' not found, falling back to default", name);
    }
    host.default_input_device()
}

/// The named output device, falling back to the default.
pub fn find_output_device(name: Option<&str>) -> Option<cpal::Device> {
    let host = cpal::default_host();
    if let Some(name) = name {
        let found = host
            .output_devices()
            .ok()
            .and_then(|mut devices| devices.find(|d| d.name().map(|n| n == name).unwrap_or(false)));
        if found.is_some() {
            return found;
        }
        log::warn!("Output device '{}' not found, falling back to default", name);
    }
    host.default_output_device()
}

fn source(name: String, default_name: &Option<String>) -> AudioSource {
    AudioSource {
        is_default: default_name.as_deref() == Some(name.as_str()),
        id: name.clone(),
        name,
    }
}
