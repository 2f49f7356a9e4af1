use clip_recorder_core::{PermissionAuthority, PermissionStatus};

/// Permission authority that asks the user at the prompt.
///
/// The answer comes back as an `allow` or `deny` line, which the event loop
/// turns into `Command::PermissionResult`.
pub struct ConsolePermission {
    status: PermissionStatus,
}

impl ConsolePermission {
    pub fn new(status: PermissionStatus) -> Self {
        Self { status }
    }

    /// Seed the status from the default microphone.
    pub fn probe() -> Self {
        Self::new(clip_recorder_cpal::permissions::check_microphone_permission())
    }
}

impl PermissionAuthority for ConsolePermission {
    fn status(&self) -> PermissionStatus {
        self.status
    }

    fn request(&mut self) {
        println!("\r* Microphone access is needed to record. Type `allow` or `deny`.");
    }

    fn resolve(&mut self, granted: bool) {
        self.status = if granted {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        };
        log::info!("Microphone permission {:?}", self.status);
    }
}
