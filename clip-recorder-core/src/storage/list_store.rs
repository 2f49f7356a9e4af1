use std::fs;
use std::io;
use std::path::PathBuf;

use crate::models::entry::RecordingEntry;
use crate::models::error::RecorderError;
use crate::models::events::ListEvent;

/// Ordered collection of recordings backed by a directory.
///
/// Order is insertion order: directory scan order (name ascending) at load,
/// then append order.
pub struct RecordingListStore {
    dir: PathBuf,
    extension: String,
    entries: Vec<RecordingEntry>,
}

impl RecordingListStore {
    pub fn new(dir: PathBuf, extension: impl Into<String>) -> Self {
        Self {
            dir,
            extension: extension.into(),
            entries: Vec::new(),
        }
    }

    /// Replace the collection with the recordings found on disk.
    ///
    /// Creates the directory when it does not exist yet.
    pub fn load(&mut self) -> Result<ListEvent, RecorderError> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            RecorderError::StorageError(format!("failed to create {}: {}", self.dir.display(), e))
        })?;

        let suffix = format!(".{}", self.extension);
        let read_dir = fs::read_dir(&self.dir).map_err(|e| {
            RecorderError::StorageError(format!("failed to list {}: {}", self.dir.display(), e))
        })?;

        let mut paths: Vec<PathBuf> = read_dir
            .flatten()
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .map(|n| n.to_string_lossy().ends_with(&suffix))
                    .unwrap_or(false)
            })
            .collect();
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        self.entries = paths.into_iter().map(RecordingEntry::from_path).collect();
        log::info!("Loaded {} recordings from {}", self.entries.len(), self.dir.display());
        Ok(ListEvent::Reloaded)
    }

    /// Append an entry.
    pub fn insert(&mut self, entry: RecordingEntry) -> ListEvent {
        self.entries.push(entry);
        ListEvent::Inserted(self.entries.len() - 1)
    }

    /// Delete the backing file and remove the entry at `index`.
    ///
    /// A file that is already gone is not an error.
    pub fn remove(&mut self, index: usize) -> Result<(RecordingEntry, ListEvent), RecorderError> {
        let entry = self.entries.get(index).ok_or(RecorderError::InvalidIndex(index))?;

        match fs::remove_file(&entry.file_path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("{} was already deleted", entry.file_path.display());
            }
            Err(e) => {
                log::warn!("Failed to delete {}: {}", entry.file_path.display(), e);
            }
        }

        let entry = self.entries.remove(index);
        Ok((entry, ListEvent::Removed(index)))
    }

    /// Event telling the display to refresh only `index`.
    pub fn notify_playing_changed(&self, index: usize) -> ListEvent {
        ListEvent::Changed(index)
    }

    pub fn set_playing(&mut self, index: usize, playing: bool) -> Result<(), RecorderError> {
        let entry = self.entries.get_mut(index).ok_or(RecorderError::InvalidIndex(index))?;
        entry.is_playing = playing;
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&RecordingEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[RecordingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the entry currently flagged as playing.
    pub fn playing_index(&self) -> Option<usize> {
        self.entries.iter().position(|e| e.is_playing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"RIFF").unwrap();
        path
    }

    #[test]
    fn load_filters_by_extension_and_sorts_by_name() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "Recording_2024-05-02_10-00-00.wav");
        touch(dir.path(), "Recording_2024-05-01_10-00-00.wav");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "Recording_2024-05-03_10-00-00.3gp");
        fs::create_dir(dir.path().join("folder.wav")).unwrap();

        let mut store = RecordingListStore::new(dir.path().to_path_buf(), "wav");
        assert_eq!(store.load().unwrap(), ListEvent::Reloaded);

        let names: Vec<&str> = store.entries().iter().map(|e| e.file_name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Recording_2024-05-01_10-00-00.wav", "Recording_2024-05-02_10-00-00.wav"]
        );
        assert!(store.entries().iter().all(|e| !e.is_playing));
    }

    #[test]
    fn load_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "b.wav");
        touch(dir.path(), "a.wav");

        let mut store = RecordingListStore::new(dir.path().to_path_buf(), "wav");
        store.load().unwrap();
        let first = store.entries().to_vec();
        store.load().unwrap();
        assert_eq!(store.entries(), first.as_slice());
    }

    #[test]
    fn load_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let clips = dir.path().join("clips");

        let mut store = RecordingListStore::new(clips.clone(), "wav");
        store.load().unwrap();
        assert!(clips.is_dir());
        assert!(store.is_empty());
    }

    #[test]
    fn insert_appends_at_end() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = RecordingListStore::new(dir.path().to_path_buf(), "wav");

        assert_eq!(store.insert(RecordingEntry::from_path(dir.path().join("a.wav"))), ListEvent::Inserted(0));
        assert_eq!(store.insert(RecordingEntry::from_path(dir.path().join("b.wav"))), ListEvent::Inserted(1));
        assert_eq!(store.get(1).unwrap().file_name, "b.wav");
    }

    #[test]
    fn remove_deletes_file_and_shifts_entries() {
        let dir = tempfile::tempdir().unwrap();
        let a = touch(dir.path(), "a.wav");
        let b = touch(dir.path(), "b.wav");
        touch(dir.path(), "c.wav");

        let mut store = RecordingListStore::new(dir.path().to_path_buf(), "wav");
        store.load().unwrap();

        let (removed, event) = store.remove(1).unwrap();
        assert_eq!(removed.file_path, b);
        assert_eq!(event, ListEvent::Removed(1));
        assert!(!b.exists());
        assert!(a.exists());
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(1).unwrap().file_name, "c.wav");
    }

    #[test]
    fn remove_tolerates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let a = touch(dir.path(), "a.wav");

        let mut store = RecordingListStore::new(dir.path().to_path_buf(), "wav");
        store.load().unwrap();
        fs::remove_file(&a).unwrap();

        assert!(store.remove(0).is_ok());
        assert!(store.is_empty());
    }

    #[test]
    fn remove_out_of_range_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = RecordingListStore::new(dir.path().to_path_buf(), "wav");
        assert_eq!(store.remove(0).unwrap_err(), RecorderError::InvalidIndex(0));
    }

    #[test]
    fn playing_flag_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = RecordingListStore::new(dir.path().to_path_buf(), "wav");
        store.insert(RecordingEntry::from_path(dir.path().join("a.wav")));
        store.insert(RecordingEntry::from_path(dir.path().join("b.wav")));

        store.set_playing(1, true).unwrap();
        assert_eq!(store.playing_index(), Some(1));
        assert_eq!(store.notify_playing_changed(1), ListEvent::Changed(1));
        store.set_playing(1, false).unwrap();
        assert_eq!(store.playing_index(), None);
    }
}
