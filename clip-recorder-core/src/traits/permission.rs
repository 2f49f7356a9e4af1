/// Microphone permission as known to the authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    NotDetermined,
    Granted,
    Denied,
}

impl PermissionStatus {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Source of truth for microphone permission.
///
/// `request` is asynchronous: the answer is delivered later as
/// `Command::PermissionResult` and recorded with `resolve`.
pub trait PermissionAuthority {
    fn status(&self) -> PermissionStatus;

    fn request(&mut self);

    fn resolve(&mut self, granted: bool);
}

/// Permission authority with a fixed answer, for platforms without a
/// consent prompt.
#[derive(Debug, Clone)]
pub struct StaticPermission {
    status: PermissionStatus,
}

impl StaticPermission {
    pub fn granted() -> Self {
        Self {
            status: PermissionStatus::Granted,
        }
    }

    pub fn denied() -> Self {
        Self {
            status: PermissionStatus::Denied,
        }
    }
}

impl PermissionAuthority for StaticPermission {
    fn status(&self) -> PermissionStatus {
        self.status
    }

    fn request(&mut self) {}

    fn resolve(&mut self, granted: bool) {
        self.status = if granted {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        };
    }
}
