//! Audio Mixer
//!
//! Joins clips into the final episode: every clip after the first is
//! preceded by [`SILENCE_GAP`] and crossfaded onto what came before.

use std::path::{Path, PathBuf};
use std::time::Duration;

use podcast_voice_domain::{AudioMixConfig, ExportFormat, FinalPodcast};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::audio::{AudioError, PcmClip, decode, effects, encode, resample};

pub const DEFAULT_CROSSFADE: Duration = Duration::from_millis(50);
pub const SILENCE_GAP: Duration = Duration::from_millis(200);
pub const FINAL_FILE_NAME: &str = "podcast_final.mp3";
pub const FINAL_SAMPLE_RATE: u32 = 48_000;
pub const FINAL_BITRATE_KBPS: u32 = 320;

#[derive(Debug, Error)]
pub enum MixError {
    #[error("no audio files to mix")]
    EmptyInput,

    #[error("failed to load {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: AudioError,
    },

    #[error("failed to join {path}: {source}")]
    Join {
        path: PathBuf,
        #[source]
        source: AudioError,
    },

    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to export {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: AudioError,
    },
}

/// Result of a mix request. An empty clip list is a normal outcome, not an
/// error, so callers can record "nothing to mix" without inspecting errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MixOutcome {
    Mixed(FinalPodcast),
    NothingToMix,
}

impl MixOutcome {
    pub fn podcast(&self) -> Option<&FinalPodcast> {
        match self {
            MixOutcome::Mixed(podcast) => Some(podcast),
            MixOutcome::NothingToMix => None,
        }
    }
}

pub struct PodcastMixer {
    config: AudioMixConfig,
    output_dir: PathBuf,
}

impl PodcastMixer {
    pub fn new(config: AudioMixConfig, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            output_dir: output_dir.into(),
        }
    }

    /// Where [`mix`](Self::mix) writes the episode.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(FINAL_FILE_NAME)
    }

    /// Mix `files` in the given order into `podcast_final.mp3`.
    pub fn mix<P: AsRef<Path>>(
        &self,
        files: &[P],
        crossfade: Duration,
    ) -> Result<FinalPodcast, MixError> {
        if files.is_empty() {
            warn!("no audio files provided to mix");
            return Err(MixError::EmptyInput);
        }

        info!(
            clips = files.len(),
            crossfade_ms = crossfade.as_millis() as u64,
            "mixing podcast"
        );

        let mut clips = Vec::with_capacity(files.len());
        for file in files {
            let path = file.as_ref();
            clips.push((path.to_path_buf(), self.load(path)?));
        }

        let mixed = join(clips, crossfade)?;

        std::fs::create_dir_all(&self.output_dir).map_err(|source| MixError::OutputDir {
            path: self.output_dir.clone(),
            source,
        })?;
        let path = self.output_path();
        encode::export(
            &mixed,
            &path,
            ExportFormat::Mp3,
            FINAL_BITRATE_KBPS,
            encode::EncodeQuality::Best,
        )
        .map_err(|source| MixError::Export {
            path: path.clone(),
            source,
        })?;

        let podcast = FinalPodcast {
            path,
            clip_count: files.len(),
            duration: mixed.duration(),
        };
        info!(
            path = %podcast.path.display(),
            duration_ms = podcast.duration.as_millis() as u64,
            "podcast exported"
        );
        Ok(podcast)
    }

    /// Like [`mix`](Self::mix), with an empty list reported as
    /// [`MixOutcome::NothingToMix`] instead of an error.
    pub fn mix_if_any<P: AsRef<Path>>(
        &self,
        files: &[P],
        crossfade: Duration,
    ) -> Result<MixOutcome, MixError> {
        match self.mix(files, crossfade) {
            Ok(podcast) => Ok(MixOutcome::Mixed(podcast)),
            Err(MixError::EmptyInput) => Ok(MixOutcome::NothingToMix),
            Err(e) => Err(e),
        }
    }

    fn load(&self, path: &Path) -> Result<PcmClip, MixError> {
        let load_err = |source| MixError::Load {
            path: path.to_path_buf(),
            source,
        };
        let clip = decode::load(path).map_err(load_err)?;
        debug!(path = %path.display(), layout = %clip.describe(), "clip loaded");
        resample::conform(clip, FINAL_SAMPLE_RATE, self.config.channels).map_err(load_err)
    }
}

/// Join clips with a leading silence gap and crossfade on every clip after
/// the first. Pure in-memory part of [`PodcastMixer::mix`].
pub fn join(clips: Vec<(PathBuf, PcmClip)>, crossfade: Duration) -> Result<PcmClip, MixError> {
    let mut clips = clips.into_iter();
    let Some((_, mut mixed)) = clips.next() else {
        return Err(MixError::EmptyInput);
    };

    for (path, clip) in clips {
        let next = effects::with_leading_silence(clip, SILENCE_GAP);
        let requested = mixed.frames_in(crossfade);
        let applied =
            effects::append_crossfade(&mut mixed, &next, crossfade).map_err(|source| {
                MixError::Join {
                    path: path.clone(),
                    source,
                }
            })?;
        if applied < requested {
            warn!(
                path = %path.display(),
                requested_frames = requested,
                applied_frames = applied,
                "crossfade longer than clip; shortened"
            );
        }
    }

    Ok(mixed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(ms: u64) -> PcmClip {
        let frames = (FINAL_SAMPLE_RATE as u64 * ms / 1_000) as usize;
        let samples = (0..frames)
            .flat_map(|i| {
                let v = (i as f32 * 0.03).sin() * 0.5;
                [v, v]
            })
            .collect();
        PcmClip::new(samples, FINAL_SAMPLE_RATE, 2)
    }

    fn named(clips: Vec<PcmClip>) -> Vec<(PathBuf, PcmClip)> {
        clips
            .into_iter()
            .enumerate()
            .map(|(i, clip)| (PathBuf::from(format!("{i:03}.mp3")), clip))
            .collect()
    }

    #[test]
    fn duration_follows_the_mix_law() {
        let mixed = join(named(vec![tone(1_000), tone(2_000), tone(1_500)]), DEFAULT_CROSSFADE)
            .unwrap();
        // d1 + (200 + d2 - 50) + (200 + d3 - 50)
        assert_eq!(mixed.duration(), Duration::from_millis(4_800));
    }

    fn level(value: f32, ms: u64) -> PcmClip {
        let frames = (FINAL_SAMPLE_RATE as u64 * ms / 1_000) as usize;
        PcmClip::new(vec![value; frames], FINAL_SAMPLE_RATE, 1)
    }

    #[test]
    fn clips_keep_their_input_order() {
        let mixed = join(
            named(vec![level(0.2, 500), level(0.5, 500), level(0.8, 500)]),
            DEFAULT_CROSSFADE,
        )
        .unwrap();
        assert_eq!(mixed.duration(), Duration::from_millis(1_800));

        let at = |ms: usize| mixed.samples()[ms * FINAL_SAMPLE_RATE as usize / 1_000];
        assert!((at(250) - 0.2).abs() < 1e-4, "250 ms: {}", at(250));
        assert!((at(900) - 0.5).abs() < 1e-4, "900 ms: {}", at(900));
        assert!((at(1_550) - 0.8).abs() < 1e-4, "1550 ms: {}", at(1_550));
        // Gap between the first and second clip is silent.
        assert!(at(550).abs() < 1e-4, "550 ms: {}", at(550));
    }

    #[test]
    fn single_clip_passes_through() {
        let mixed = join(named(vec![tone(750)]), DEFAULT_CROSSFADE).unwrap();
        assert_eq!(mixed.duration(), Duration::from_millis(750));
    }

    #[test]
    fn empty_join_is_an_error() {
        assert!(matches!(
            join(Vec::new(), DEFAULT_CROSSFADE),
            Err(MixError::EmptyInput)
        ));
    }

    #[test]
    fn zero_crossfade_is_plain_concatenation() {
        let mixed = join(named(vec![tone(100), tone(100)]), Duration::ZERO).unwrap();
        assert_eq!(mixed.duration(), Duration::from_millis(400));
    }

    #[test]
    fn mismatched_layout_names_the_offending_file() {
        let odd = PcmClip::new(vec![0.0; 480], 24_000, 1);
        let err = join(named(vec![tone(100), odd]), DEFAULT_CROSSFADE).unwrap_err();
        assert!(matches!(err, MixError::Join { ref path, .. } if path == Path::new("001.mp3")));
    }

    #[test]
    fn empty_file_list_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mixer = PodcastMixer::new(AudioMixConfig::default(), dir.path().join("podcast"));
        let files: Vec<PathBuf> = Vec::new();

        assert!(matches!(
            mixer.mix(&files, DEFAULT_CROSSFADE),
            Err(MixError::EmptyInput)
        ));
        assert_eq!(
            mixer.mix_if_any(&files, DEFAULT_CROSSFADE).unwrap(),
            MixOutcome::NothingToMix
        );
        assert!(!mixer.output_path().exists());
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let mixer = PodcastMixer::new(AudioMixConfig::default(), dir.path());
        let err = mixer
            .mix(&[dir.path().join("nope.mp3")], DEFAULT_CROSSFADE)
            .unwrap_err();
        assert!(matches!(err, MixError::Load { .. }));
    }
}
