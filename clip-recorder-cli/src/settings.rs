use std::path::{Path, PathBuf};

use clip_recorder_core::{RecorderConfig, RecorderError};

pub const CONFIG_ENV: &str = "CLIP_RECORDER_CONFIG";

/// Load the config from `path` when given, else use defaults.
///
/// A relative `recordings_dir` is resolved against `data_dir`.
pub fn load_config(path: Option<&Path>, data_dir: &Path) -> Result<RecorderConfig, RecorderError> {
    let mut config = match path {
        Some(path) => {
            log::info!("Loading config from {}", path.display());
            RecorderConfig::from_json_file(path)?
        }
        None => RecorderConfig::default(),
    };
    if config.recordings_dir.is_relative() {
        config.recordings_dir = data_dir.join(&config.recordings_dir);
    }
    Ok(config)
}

/// Config file named by the first argument or the environment.
pub fn config_path(arg: Option<String>, env: Option<String>) -> Option<PathBuf> {
    arg.or(env).filter(|p| !p.is_empty()).map(PathBuf::from)
}

/// Per-user application data directory.
pub fn data_dir() -> PathBuf {
    dirs_next::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("clip-recorder")
}
