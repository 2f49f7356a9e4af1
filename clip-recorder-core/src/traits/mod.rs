pub mod capture_provider;
pub mod permission;
pub mod playback_provider;
pub mod recorder_delegate;
pub mod share_target;
