//! Speech Synthesizer
//!
//! Voices each dialogue line with the speaker's registered profile and
//! persists one clip per line. Lines fail independently: a bad line is
//! reported as skipped and the batch moves on.

use std::fmt;
use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use podcast_voice_domain::{
    AudioMixConfig, DialogueLine, SpeechProvider, SpeechRequest, SynthesizedClip, VoiceProfile,
    VoiceRegistry,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::audio::{decode, effects, encode, resample};

/// Why a line produced no clip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    EmptySpeaker,
    EmptyText,
    UnknownSpeaker,
    Provider(String),
    Io(String),
    Audio(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::EmptySpeaker => f.write_str("missing speaker"),
            SkipReason::EmptyText => f.write_str("missing text"),
            SkipReason::UnknownSpeaker => f.write_str("no voice registered for speaker"),
            SkipReason::Provider(e) => write!(f, "speech provider failed: {e}"),
            SkipReason::Io(e) => write!(f, "could not write clip: {e}"),
            SkipReason::Audio(e) => write!(f, "could not process clip: {e}"),
        }
    }
}

/// What happened to one dialogue line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LineOutcome {
    Synthesized(SynthesizedClip),
    Skipped {
        index: usize,
        speaker: String,
        reason: SkipReason,
    },
}

impl LineOutcome {
    pub fn index(&self) -> usize {
        match self {
            LineOutcome::Synthesized(clip) => clip.index,
            LineOutcome::Skipped { index, .. } => *index,
        }
    }
}

/// Per-line results for a whole script, in script order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SynthesisReport {
    outcomes: Vec<LineOutcome>,
}

impl SynthesisReport {
    pub fn outcomes(&self) -> &[LineOutcome] {
        &self.outcomes
    }

    pub fn clips(&self) -> impl Iterator<Item = &SynthesizedClip> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            LineOutcome::Synthesized(clip) => Some(clip),
            LineOutcome::Skipped { .. } => None,
        })
    }

    pub fn skipped(&self) -> impl Iterator<Item = &LineOutcome> {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome, LineOutcome::Skipped { .. }))
    }

    /// Paths of the persisted clips in line order.
    ///
    /// Equal to lexicographic order of the file names while the script has
    /// fewer than a thousand lines; ordering by index keeps it right beyond.
    pub fn paths(&self) -> Vec<PathBuf> {
        let mut clips: Vec<&SynthesizedClip> = self.clips().collect();
        clips.sort_by_key(|clip| clip.index);
        clips.into_iter().map(|clip| clip.path.clone()).collect()
    }

    pub fn synthesized_count(&self) -> usize {
        self.clips().count()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped().count()
    }
}

/// Failure that stops the whole batch before any line is attempted.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("cannot create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Turns dialogue lines into audio clips on disk.
pub struct SpeechSynthesizer<P> {
    provider: P,
    registry: VoiceRegistry,
    config: AudioMixConfig,
    output_dir: PathBuf,
}

impl<P: SpeechProvider> SpeechSynthesizer<P> {
    pub fn new(
        provider: P,
        registry: VoiceRegistry,
        config: AudioMixConfig,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            provider,
            registry,
            config,
            output_dir: output_dir.into(),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn registry(&self) -> &VoiceRegistry {
        &self.registry
    }

    /// Synthesize every line in order, one provider call at a time.
    pub async fn synthesize(
        &self,
        dialogue: &[DialogueLine],
    ) -> Result<SynthesisReport, SynthesisError> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| SynthesisError::OutputDir {
                path: self.output_dir.clone(),
                source,
            })?;

        info!(
            lines = dialogue.len(),
            output_dir = %self.output_dir.display(),
            "synthesizing dialogue"
        );

        let mut outcomes = Vec::with_capacity(dialogue.len());
        for (index, line) in dialogue.iter().enumerate() {
            outcomes.push(self.synthesize_line(index, line).await);
        }

        let report = SynthesisReport { outcomes };
        info!(
            synthesized = report.synthesized_count(),
            skipped = report.skipped_count(),
            "synthesis finished"
        );
        Ok(report)
    }

    async fn synthesize_line(&self, index: usize, line: &DialogueLine) -> LineOutcome {
        let speaker = line.speaker.trim();
        let text = line.text.trim();

        let skip = |reason: SkipReason| {
            warn!(index, speaker, %reason, "skipping line");
            LineOutcome::Skipped {
                index,
                speaker: speaker.to_string(),
                reason,
            }
        };

        if speaker.is_empty() {
            return skip(SkipReason::EmptySpeaker);
        }
        if text.is_empty() {
            return skip(SkipReason::EmptyText);
        }
        let Some(profile) = self.registry.get(speaker) else {
            return skip(SkipReason::UnknownSpeaker);
        };

        match self.render(index, speaker, text, profile).await {
            Ok(path) => {
                info!(index, speaker, path = %path.display(), "clip saved");
                LineOutcome::Synthesized(SynthesizedClip {
                    index,
                    speaker: speaker.to_string(),
                    path,
                })
            }
            Err(reason) => skip(reason),
        }
    }

    async fn render(
        &self,
        index: usize,
        speaker: &str,
        text: &str,
        profile: &VoiceProfile,
    ) -> Result<PathBuf, SkipReason> {
        let request = SpeechRequest::for_profile(profile, text);
        let mut stream = self
            .provider
            .convert(&request)
            .await
            .map_err(|e| SkipReason::Provider(e.to_string()))?;

        let mut audio = Vec::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| SkipReason::Provider(e.to_string()))?;
            audio.extend_from_slice(&chunk);
        }
        if audio.is_empty() {
            return Err(SkipReason::Provider("empty audio response".to_string()));
        }
        debug!(index, bytes = audio.len(), "audio received");

        let format = profile.output_format;
        let (audio, source_ext) = if format.is_raw_pcm() {
            let wav = encode::wrap_raw_pcm(&audio, format.sample_rate())
                .map_err(|e| SkipReason::Audio(e.to_string()))?;
            (wav, "wav")
        } else {
            (audio, "mp3")
        };

        let path = SynthesizedClip::file_path(
            &self.output_dir,
            index,
            speaker,
            self.config.format.extension(),
        );

        if !self.config.normalize && source_ext == self.config.format.extension() {
            tokio::fs::write(&path, &audio)
                .await
                .map_err(|e| SkipReason::Io(e.to_string()))?;
            return Ok(path);
        }

        let config = self.config.clone();
        let target = path.clone();
        tokio::task::spawn_blocking(move || process_clip(audio, source_ext, &config, &target))
            .await
            .map_err(|e| SkipReason::Audio(e.to_string()))??;

        Ok(path)
    }
}

/// Decode, level and re-encode one clip into the configured clip format.
fn process_clip(
    audio: Vec<u8>,
    source_ext: &str,
    config: &AudioMixConfig,
    path: &Path,
) -> Result<(), SkipReason> {
    let audio_err = |e: crate::audio::AudioError| SkipReason::Audio(e.to_string());

    let mut clip = decode::decode_bytes(audio, Some(source_ext)).map_err(audio_err)?;
    if config.normalize && effects::peak_normalize(&mut clip, config.normalize_headroom_db) {
        effects::apply_gain(&mut clip, config.post_normalize_gain_db);
    }
    let clip = resample::conform(clip, config.sample_rate, config.channels).map_err(audio_err)?;

    encode::export(
        &clip,
        path,
        config.format,
        config.bitrate_kbps,
        encode::EncodeQuality::Standard,
    )
    .map_err(|e| match e {
        crate::audio::AudioError::Io(io) => SkipReason::Io(io.to_string()),
        other => SkipReason::Audio(other.to_string()),
    })
}
