//! Microphone access probe.
//!
//! Desktop platforms gate the microphone in system privacy settings rather
//! than with a per-app prompt that cpal can trigger. Opening the default
//! input configuration is the closest available signal: it fails when the
//! device is missing or access is blocked.

use cpal::traits::{DeviceTrait, HostTrait};

use clip_recorder_core::traits::permission::PermissionStatus;

/// Check whether the default microphone can be opened.
pub fn check_microphone_permission() -> PermissionStatus {
    let host = cpal::default_host();
    let Some(device) = host.default_input_device() else {
        log::warn!("No input device found");
        return PermissionStatus::NotDetermined;
    };

    match device.default_input_config() {
        Ok(_) => PermissionStatus::Granted,
        Err(e) => {
            log::warn!("Microphone is not accessible: {}", e);
            PermissionStatus::Denied
        }
    }
}
