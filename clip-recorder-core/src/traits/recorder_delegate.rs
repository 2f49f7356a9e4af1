use crate::models::events::Notification;

/// Observer of recorder notifications (the list display surface).
///
/// Called synchronously from `Recorder` on the caller's thread, in the order
/// the events happen.
pub trait RecorderDelegate {
    fn notify(&self, notification: &Notification);
}
