//! `data/audio_generation.json`: what a run produced and what it skipped.

use std::io;
use std::path::{Path, PathBuf};

use podcast_voice_domain::FinalPodcast;
use serde::{Deserialize, Serialize};

use crate::synthesizer::{LineOutcome, SkipReason, SynthesisReport};

pub const METADATA_FILE_NAME: &str = "audio_generation.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedLine {
    pub index: usize,
    pub speaker: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioGeneration {
    pub segment_files: Vec<PathBuf>,
    /// `None` when there was nothing to mix.
    pub final_podcast: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub skipped: Vec<SkippedLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mix_error: Option<String>,
}

impl AudioGeneration {
    pub fn new(report: &SynthesisReport, podcast: Option<&FinalPodcast>) -> Self {
        let skipped = report
            .skipped()
            .filter_map(|outcome| match outcome {
                LineOutcome::Skipped {
                    index,
                    speaker,
                    reason,
                } => Some(SkippedLine {
                    index: *index,
                    speaker: speaker.clone(),
                    reason: reason.clone(),
                }),
                LineOutcome::Synthesized(_) => None,
            })
            .collect();

        Self {
            segment_files: report.paths(),
            final_podcast: podcast.map(|p| p.path.clone()),
            duration_ms: podcast.map(|p| p.duration.as_millis() as u64),
            skipped,
            mix_error: None,
        }
    }

    pub fn with_mix_error(mut self, error: impl ToString) -> Self {
        self.mix_error = Some(error.to_string());
        self
    }

    /// Write pretty JSON to `{dir}/audio_generation.json`.
    pub fn write(&self, dir: &Path) -> io::Result<PathBuf> {
        let path = dir.join(METADATA_FILE_NAME);
        let json = serde_json::to_vec_pretty(self).map_err(io::Error::other)?;
        std::fs::write(&path, json)?;
        Ok(path)
    }

    pub fn read(path: &Path) -> io::Result<Self> {
        let bytes = std::fs::read(path)?;
        serde_json::from_slice(&bytes).map_err(io::Error::other)
    }
}
