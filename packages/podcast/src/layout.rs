//! Timestamped run directory: `{root}/{YYYYmmdd_HHMMSS}/{segments,podcast,data}`.

use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunDirectories {
    pub base: PathBuf,
    /// Per-line clips.
    pub segments: PathBuf,
    /// Final episode.
    pub podcast: PathBuf,
    /// Run metadata.
    pub data: PathBuf,
}

impl RunDirectories {
    /// Create a fresh run directory under `root`, stamped with the local time.
    pub fn create(root: &Path) -> io::Result<Self> {
        Self::create_at(root, Local::now())
    }

    pub fn create_at(root: &Path, started: DateTime<Local>) -> io::Result<Self> {
        let base = root.join(started.format(TIMESTAMP_FORMAT).to_string());
        let dirs = Self {
            segments: base.join("segments"),
            podcast: base.join("podcast"),
            data: base.join("data"),
            base,
        };
        for dir in [&dirs.segments, &dirs.podcast, &dirs.data] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(dirs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn run_directory_is_named_after_its_start_time() {
        let root = tempfile::tempdir().unwrap();
        let started = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();

        let dirs = RunDirectories::create_at(root.path(), started).unwrap();

        assert_eq!(dirs.base, root.path().join("20240309_070501"));
        assert!(dirs.segments.is_dir());
        assert!(dirs.podcast.is_dir());
        assert!(dirs.data.is_dir());
    }
}
