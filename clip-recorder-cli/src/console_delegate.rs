use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use clip_recorder_core::{ListEvent, Notification, PlaybackTarget, RecorderDelegate, RecordingEntry, RecordingState};

/// RecorderDelegate that prints notifications to the terminal.
///
/// List events only mark the list stale; the event loop redraws it with
/// [`take_list_dirty`](Self::take_list_dirty) once the command has finished.
pub struct ConsoleDelegate {
    list_dirty: AtomicBool,
    progress: Mutex<Option<(PlaybackTarget, u8)>>,
}

impl ConsoleDelegate {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            list_dirty: AtomicBool::new(false),
            progress: Mutex::new(None),
        })
    }

    /// Returns whether a list event arrived since the last call.
    pub fn take_list_dirty(&self) -> bool {
        self.list_dirty.swap(false, Ordering::Relaxed)
    }

    /// Record a progress value. Returns false when it repeats the last one.
    fn progress_changed(&self, target: PlaybackTarget, percent: u8) -> bool {
        let mut last = self.progress.lock();
        if *last == Some((target, percent)) {
            return false;
        }
        *last = Some((target, percent));
        true
    }
}

impl RecorderDelegate for ConsoleDelegate {
    fn notify(&self, notification: &Notification) {
        match notification {
            Notification::List(_) => {
                self.list_dirty.store(true, Ordering::Relaxed);
            }
            Notification::Progress { target, percent } => {
                if self.progress_changed(*target, *percent) && *percent > 0 {
                    print!("\r  {} {:>3}%", target_label(*target), percent);
                    let _ = io::stdout().flush();
                }
            }
            other => {
                if let Some(line) = describe(other) {
                    println!("\r{}", line);
                }
            }
        }
    }
}

/// Terminal line for a notification, if it has one.
pub fn describe(notification: &Notification) -> Option<String> {
    match notification {
        Notification::Status(text) => Some(format!("* {}", text)),
        Notification::RecordingStateChanged(RecordingState::Recording { file_path }) => {
            Some(format!("  recording to {}", file_path.display()))
        }
        Notification::RecordingStateChanged(RecordingState::Idle) => None,
        Notification::RecordingSaved(entry) => Some(format!("  saved {}", entry.file_name)),
        Notification::PlaybackStarted { target, .. } => Some(format!("  > {}", target_label(*target))),
        Notification::PlaybackStopped { .. } | Notification::PlaybackCompleted { .. } => None,
        Notification::List(event) => match event {
            ListEvent::Reloaded => Some("  list reloaded".into()),
            _ => None,
        },
        Notification::Progress { .. } => None,
    }
}

fn target_label(target: PlaybackTarget) -> String {
    match target {
        PlaybackTarget::Primary => "last recording".into(),
        PlaybackTarget::List(index) => format!("clip {}", index),
    }
}

/// Render the clip list, marking the playing entry.
pub fn render_list(entries: &[RecordingEntry]) -> String {
    if entries.is_empty() {
        return "  (no recordings)".into();
    }
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let marker = if entry.is_playing { '>' } else { ' ' };
            format!("{} {:>3}  {}", marker, i, entry.file_name)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
