use std::fs;
use std::path::{Path, PathBuf};

use clip_recorder_core::{RecorderError, ShareTarget};

/// Shares a clip by copying it into an export directory and printing its
/// `file://` location. Without an export directory the clip is shared in
/// place.
pub struct ExportDirShare {
    export_dir: Option<PathBuf>,
}

impl ExportDirShare {
    pub fn new(export_dir: Option<PathBuf>) -> Self {
        Self { export_dir }
    }

    /// Copy (if configured) and return the shared file's absolute path.
    pub fn export(&self, path: &Path) -> Result<PathBuf, RecorderError> {
        let source = fs::canonicalize(path).map_err(|_| RecorderError::FileNotFound(path.to_path_buf()))?;

        let Some(dir) = &self.export_dir else {
            return Ok(source);
        };
        let file_name = source
            .file_name()
            .ok_or_else(|| RecorderError::ShareFailed(format!("not a file: {}", source.display())))?;

        fs::create_dir_all(dir).map_err(|e| RecorderError::ShareFailed(format!("{}: {}", dir.display(), e)))?;
        let target = dir.join(file_name);
        fs::copy(&source, &target).map_err(|e| RecorderError::ShareFailed(format!("{}: {}", target.display(), e)))?;
        fs::canonicalize(&target).map_err(|e| RecorderError::ShareFailed(e.to_string()))
    }
}

impl ShareTarget for ExportDirShare {
    fn share(&self, path: &Path) -> Result<(), RecorderError> {
        let shared = self.export(path)?;
        log::info!("Shared {} as {}", path.display(), shared.display());
        println!("\r  {}", file_url(&shared));
        Ok(())
    }
}

fn file_url(path: &Path) -> String {
    let text = path.to_string_lossy().replace('\\', "/");
    if text.starts_with('/') {
        format!("file://{}", text)
    } else {
        format!("file:///{}", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_into_export_dir() {
        let dir = tempfile::tempdir().unwrap();
        let clip = dir.path().join("Recording_1.wav");
        fs::write(&clip, b"RIFF").unwrap();

        let share = ExportDirShare::new(Some(dir.path().join("out")));
        let shared = share.export(&clip).unwrap();

        assert!(shared.ends_with("out/Recording_1.wav"));
        assert_eq!(fs::read(&shared).unwrap(), b"RIFF");
        assert!(clip.exists());
    }

    #[test]
    fn shares_in_place_without_export_dir() {
        let dir = tempfile::tempdir().unwrap();
        let clip = dir.path().join("Recording_1.wav");
        fs::write(&clip, b"RIFF").unwrap();

        let shared = ExportDirShare::new(None).export(&clip).unwrap();
        assert_eq!(shared, fs::canonicalize(&clip).unwrap());
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let clip = dir.path().join("gone.wav");

        let err = ExportDirShare::new(None).share(&clip).unwrap_err();
        assert_eq!(err, RecorderError::FileNotFound(clip));
    }

    #[test]
    fn builds_file_urls() {
        assert_eq!(file_url(Path::new("/tmp/a.wav")), "file:///tmp/a.wav");
        assert_eq!(file_url(Path::new("C:\\clips\\a.wav")), "file:///C:/clips/a.wav");
    }
}
