use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

/// Prefix of every recording file name.
pub const RECORDING_PREFIX: &str = "Recording_";

/// Timestamp layout embedded in recording file names.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// `Recording_<yyyy-MM-dd_HH-mm-ss>.<ext>` for the given instant.
pub fn recording_file_name<Tz: TimeZone>(at: &DateTime<Tz>, extension: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{}{}.{}", RECORDING_PREFIX, at.format(TIMESTAMP_FORMAT), extension)
}

/// Output path for a recording started now.
pub fn new_recording_path(dir: &Path, extension: &str) -> PathBuf {
    dir.join(recording_file_name(&Local::now(), extension))
}

/// Recover the timestamp from a recording file name, if it follows the convention.
pub fn parse_recording_time(file_name: &str, extension: &str) -> Option<NaiveDateTime> {
    let stamp = file_name
        .strip_prefix(RECORDING_PREFIX)?
        .strip_suffix(extension)?
        .strip_suffix('.')?;
    NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    #[test]
    fn formats_timestamp_name() {
        let at = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 2).unwrap();
        assert_eq!(recording_file_name(&at, "wav"), "Recording_2024-03-07_09-05-02.wav");
    }

    #[test]
    fn parses_back_the_timestamp() {
        let parsed = parse_recording_time("Recording_2024-03-07_09-05-02.wav", "wav").unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 2)
            .unwrap();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn rejects_foreign_names() {
        assert!(parse_recording_time("notes.wav", "wav").is_none());
        assert!(parse_recording_time("Recording_2024-03-07_09-05-02.3gp", "wav").is_none());
        assert!(parse_recording_time("Recording_yesterday.wav", "wav").is_none());
    }

    #[test]
    fn new_path_lives_in_directory() {
        let path = new_recording_path(Path::new("/clips"), "wav");
        assert_eq!(path.parent(), Some(Path::new("/clips")));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(parse_recording_time(&name, "wav").is_some());
    }
}
