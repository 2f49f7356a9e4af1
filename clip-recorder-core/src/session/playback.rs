use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::models::error::RecorderError;
use crate::models::events::{ListEvent, Notification};
use crate::models::state::{PlaybackState, PlaybackTarget};
use crate::session::ticker::{progress_percent, ProgressTicker};
use crate::storage::list_store::RecordingListStore;
use crate::traits::playback_provider::{ActivePlayback, PlaybackProvider};

/// The one active playback and the timer polling its progress.
struct PlaybackSession {
    target: PlaybackTarget,
    file_path: PathBuf,
    player: Box<dyn ActivePlayback>,
    ticker: ProgressTicker,
}

/// How a playback session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ending {
    Stopped,
    Completed,
}

/// Keeps at most one playback active across the list and the primary transport.
///
/// Starting a new playback stops the current one first: its player is
/// released, its entry's `is_playing` flag cleared, and observers notified,
/// all before the new player is opened.
pub struct PlaybackCoordinator {
    active: Option<PlaybackSession>,
    list_interval: Duration,
    primary_interval: Duration,
}

impl PlaybackCoordinator {
    pub fn new(list_interval: Duration, primary_interval: Duration) -> Self {
        Self {
            active: None,
            list_interval,
            primary_interval,
        }
    }

    pub fn state(&self) -> PlaybackState {
        match &self.active {
            Some(session) => PlaybackState::Playing {
                target: session.target,
                file_path: session.file_path.clone(),
            },
            None => PlaybackState::Idle,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.active.is_some()
    }

    /// Index of the list entry being played, if the list slot is active.
    pub fn playing_index(&self) -> Option<usize> {
        self.active.as_ref().and_then(|s| s.target.list_index())
    }

    pub fn playing_file(&self) -> Option<&Path> {
        self.active.as_ref().map(|s| s.file_path.as_path())
    }

    /// Play the list entry at `index`, or stop it if it is the one playing.
    pub fn play_entry(
        &mut self,
        index: usize,
        store: &mut RecordingListStore,
        provider: &mut dyn PlaybackProvider,
        now: Instant,
        out: &mut Vec<Notification>,
    ) -> Result<(), RecorderError> {
        self.reap_finished(store, out);

        let file_path = store
            .get(index)
            .map(|entry| entry.file_path.clone())
            .ok_or(RecorderError::InvalidIndex(index))?;

        if self.playing_index() == Some(index) {
            self.stop(store, out);
            return Ok(());
        }
        self.stop(store, out);

        self.begin(PlaybackTarget::List(index), file_path, provider, now, out)?;
        store.set_playing(index, true)?;
        out.push(Notification::List(store.notify_playing_changed(index)));
        Ok(())
    }

    /// Play `last_recording` on the primary transport, or stop it if the
    /// primary transport is active.
    pub fn toggle_primary(
        &mut self,
        last_recording: Option<&Path>,
        store: &mut RecordingListStore,
        provider: &mut dyn PlaybackProvider,
        now: Instant,
        out: &mut Vec<Notification>,
    ) -> Result<(), RecorderError> {
        self.reap_finished(store, out);

        if self.active.as_ref().map(|s| s.target) == Some(PlaybackTarget::Primary) {
            self.stop(store, out);
            return Ok(());
        }

        let file_path = last_recording.ok_or(RecorderError::NoRecording)?.to_path_buf();
        self.stop(store, out);
        self.begin(PlaybackTarget::Primary, file_path, provider, now, out)
    }

    /// Stop the active playback. Returns false when nothing was playing.
    pub fn stop(&mut self, store: &mut RecordingListStore, out: &mut Vec<Notification>) -> bool {
        self.end(Ending::Stopped, store, out)
    }

    /// Poll the active playback: report completion, or progress when the
    /// ticker is due.
    pub fn tick(&mut self, store: &mut RecordingListStore, now: Instant, out: &mut Vec<Notification>) {
        if self.reap_finished(store, out) {
            return;
        }
        if let Some(session) = self.active.as_mut() {
            if session.ticker.poll(now) {
                out.push(Notification::Progress {
                    target: session.target,
                    percent: progress_percent(session.player.position(), session.player.duration()),
                });
            }
        }
    }

    /// Keep the tracked index in step with a removal from the list.
    ///
    /// The removed entry must not be the one playing; stop it first.
    pub fn entry_removed(&mut self, removed: usize) {
        if let Some(session) = self.active.as_mut() {
            if let PlaybackTarget::List(index) = session.target {
                if index > removed {
                    session.target = PlaybackTarget::List(index - 1);
                }
            }
        }
    }

    fn begin(
        &mut self,
        target: PlaybackTarget,
        file_path: PathBuf,
        provider: &mut dyn PlaybackProvider,
        now: Instant,
        out: &mut Vec<Notification>,
    ) -> Result<(), RecorderError> {
        if !file_path.exists() {
            return Err(RecorderError::FileNotFound(file_path));
        }

        let mut player = provider.open(&file_path)?;
        player.begin()?;

        log::info!("Playback started: {}", file_path.display());
        let period = match target {
            PlaybackTarget::Primary => self.primary_interval,
            PlaybackTarget::List(_) => self.list_interval,
        };
        out.push(Notification::PlaybackStarted {
            target,
            file_path: file_path.clone(),
        });
        out.push(Notification::Status("Playing...".into()));
        self.active = Some(PlaybackSession {
            target,
            file_path,
            player,
            ticker: ProgressTicker::new(period, now),
        });
        Ok(())
    }

    fn reap_finished(&mut self, store: &mut RecordingListStore, out: &mut Vec<Notification>) -> bool {
        let finished = self.active.as_ref().map(|s| s.player.is_finished()).unwrap_or(false);
        finished && self.end(Ending::Completed, store, out)
    }

    fn end(&mut self, ending: Ending, store: &mut RecordingListStore, out: &mut Vec<Notification>) -> bool {
        let Some(session) = self.active.take() else {
            return false;
        };
        let PlaybackSession {
            target,
            file_path,
            player,
            ticker: _,
        } = session;

        // Release the output device before anyone can start another player.
        drop(player);

        if let PlaybackTarget::List(index) = target {
            if store.set_playing(index, false).is_ok() {
                out.push(Notification::List(ListEvent::Changed(index)));
            }
        }
        out.push(Notification::Progress { target, percent: 0 });

        match ending {
            Ending::Stopped => {
                log::info!("Playback stopped: {}", file_path.display());
                out.push(Notification::PlaybackStopped { target });
                out.push(Notification::Status("Playback stopped".into()));
            }
            Ending::Completed => {
                log::info!("Playback complete: {}", file_path.display());
                out.push(Notification::PlaybackCompleted { target });
                out.push(Notification::Status("Playback complete".into()));
            }
        }
        true
    }
}
