use std::time::{Duration, Instant};

/// Cooperative progress timer owned by a playback session.
///
/// Fires immediately on the first poll, then once per period. Dropping the
/// session drops the ticker, so nothing keeps polling a released player.
#[derive(Debug, Clone)]
pub struct ProgressTicker {
    period: Duration,
    next_due: Instant,
}

impl ProgressTicker {
    pub fn new(period: Duration, now: Instant) -> Self {
        Self { period, next_due: now }
    }

    /// Returns true when the ticker is due and schedules the next firing.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due = now + self.period;
        true
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }
}

/// Position as a 0–100 percentage of duration.
pub fn progress_percent(position: Duration, duration: Duration) -> u8 {
    if duration.is_zero() {
        return 0;
    }
    let percent = position.as_millis() * 100 / duration.as_millis().max(1);
    percent.min(100) as u8
}
