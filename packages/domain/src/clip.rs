//! Artifacts written to disk by the synthesizer and the mixer.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// One persisted line of dialogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesizedClip {
    /// Position of the source line in the script.
    pub index: usize,
    pub speaker: String,
    pub path: PathBuf,
}

impl SynthesizedClip {
    /// `{dir}/{index:03}_{speaker}.{extension}`.
    ///
    /// The zero padding keeps lexicographic order equal to script order for
    /// the first thousand lines.
    pub fn file_path(dir: &Path, index: usize, speaker: &str, extension: &str) -> PathBuf {
        dir.join(format!("{index:03}_{speaker}.{extension}"))
    }
}

/// The mixed episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalPodcast {
    pub path: PathBuf,
    pub clip_count: usize,
    #[serde(with = "duration_ms")]
    pub duration: Duration,
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_paths_sort_in_script_order() {
        let dir = Path::new("/tmp/segments");
        let mut paths = vec![
            SynthesizedClip::file_path(dir, 10, "Guido", "mp3"),
            SynthesizedClip::file_path(dir, 2, "Julia", "mp3"),
            SynthesizedClip::file_path(dir, 1, "Guido", "mp3"),
        ];
        paths.sort();
        assert_eq!(paths[0], dir.join("001_Guido.mp3"));
        assert_eq!(paths[1], dir.join("002_Julia.mp3"));
        assert_eq!(paths[2], dir.join("010_Guido.mp3"));
    }
}
