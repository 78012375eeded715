//! One full run: synthesize every line, mix, record metadata.

use std::path::{Path, PathBuf};

use podcast_voice_domain::{DialogueLine, PodcastScript, SpeechProvider, VoiceRegistry};
use thiserror::Error;
use tracing::{error, info};

use crate::config::PodcastConfig;
use crate::layout::RunDirectories;
use crate::metadata::AudioGeneration;
use crate::mixer::{MixError, MixOutcome, PodcastMixer};
use crate::synthesizer::{SpeechSynthesizer, SynthesisError, SynthesisReport};

#[derive(Debug, Error)]
pub enum ProduceError {
    #[error("failed to read script {path}: {source}")]
    ScriptRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid script {path}: {source}")]
    ScriptParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to create run directory under {root}: {source}")]
    RunDirectory {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    #[error(transparent)]
    Mix(#[from] MixError),

    #[error("mixing task failed: {0}")]
    MixTask(#[source] tokio::task::JoinError),

    #[error("failed to write run metadata: {0}")]
    Metadata(#[source] std::io::Error),
}

/// Everything a finished run produced.
#[derive(Debug)]
pub struct EpisodeRun {
    pub dirs: RunDirectories,
    pub report: SynthesisReport,
    pub mix: MixOutcome,
    pub metadata: PathBuf,
}

/// Read a `{"dialogue": [...]}` script from disk.
pub fn read_script(path: &Path) -> Result<PodcastScript, ProduceError> {
    let bytes = std::fs::read(path).map_err(|source| ProduceError::ScriptRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ProduceError::ScriptParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Synthesize `dialogue` into a fresh run directory under `root` and mix the
/// clips. Metadata is written even when mixing fails; the mix error is then
/// returned after it.
pub async fn produce<P: SpeechProvider>(
    provider: P,
    registry: VoiceRegistry,
    config: &PodcastConfig,
    dialogue: &[DialogueLine],
    root: &Path,
) -> Result<EpisodeRun, ProduceError> {
    let dirs = RunDirectories::create(root).map_err(|source| ProduceError::RunDirectory {
        root: root.to_path_buf(),
        source,
    })?;
    info!(run = %dirs.base.display(), "starting podcast run");

    let synthesizer =
        SpeechSynthesizer::new(provider, registry, config.mix.clone(), &dirs.segments);
    let report = synthesizer.synthesize(dialogue).await?;

    let mixer = PodcastMixer::new(config.mix.clone(), &dirs.podcast);
    let paths = report.paths();
    let crossfade = config.crossfade();
    let mix = tokio::task::spawn_blocking(move || mixer.mix_if_any(&paths, crossfade))
        .await
        .map_err(ProduceError::MixTask)?;

    let (metadata, mix) = match mix {
        Ok(outcome) => (AudioGeneration::new(&report, outcome.podcast()), outcome),
        Err(e) => {
            error!(error = %e, "mixing failed");
            let metadata = AudioGeneration::new(&report, None).with_mix_error(&e);
            metadata
                .write(&dirs.data)
                .map_err(ProduceError::Metadata)?;
            return Err(e.into());
        }
    };
    let metadata = metadata.write(&dirs.data).map_err(ProduceError::Metadata)?;

    if matches!(mix, MixOutcome::NothingToMix) {
        info!("no clips were synthesized; nothing to mix");
    }

    Ok(EpisodeRun {
        dirs,
        report,
        mix,
        metadata,
    })
}
