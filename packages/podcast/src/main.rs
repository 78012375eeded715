use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use podcast_voice::{
    LineOutcome, PodcastConfig, PodcastMixer, SpeechSynthesizer, produce, read_script,
};
use podcast_voice_elevenlabs::ElevenLabsClient;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML configuration; built-in two-host defaults when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Synthesize a script and mix it into a timestamped run directory
    Produce {
        /// Dialogue script (`{"dialogue": [{"speaker", "text"}, ...]}`)
        #[arg(short, long)]
        script: PathBuf,

        /// Parent directory for run directories
        #[arg(long)]
        output_root: Option<PathBuf>,

        /// Crossfade between clips in milliseconds
        #[arg(long)]
        crossfade_ms: Option<u64>,
    },

    /// Synthesize one clip per line without mixing
    Synthesize {
        #[arg(short, long)]
        script: PathBuf,

        #[arg(short, long)]
        out_dir: PathBuf,
    },

    /// Mix existing clips, in the order given
    Mix {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[arg(short, long)]
        out_dir: PathBuf,

        #[arg(long)]
        crossfade_ms: Option<u64>,
    },

    /// List configured speakers and their voice settings
    Voices,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // .env may set RUST_LOG.
    let dotenv = dotenvy::dotenv();
    init_tracing(args.verbose);
    if let Err(e) = dotenv {
        if !e.not_found() {
            warn!(error = %e, "ignoring unreadable .env file");
        }
    }

    let mut config = PodcastConfig::load_or_default(args.config.as_deref())
        .context("failed to load configuration")?;

    match args.command {
        Command::Produce {
            script,
            output_root,
            crossfade_ms,
        } => {
            if let Some(root) = output_root {
                config.output_root = root;
            }
            if let Some(ms) = crossfade_ms {
                config.crossfade_ms = ms;
            }

            let script = read_script(&script)?;
            let registry = config.registry_from_env()?;
            let client = ElevenLabsClient::from_env().context("ElevenLabs client setup failed")?;

            let run = produce(
                client,
                registry,
                &config,
                &script.dialogue,
                &config.output_root,
            )
            .await?;

            match run.mix.podcast() {
                Some(podcast) => println!("{}", podcast.path.display()),
                None => warn!("no lines were synthesized"),
            }
            info!(metadata = %run.metadata.display(), "run complete");
        }

        Command::Synthesize { script, out_dir } => {
            let script = read_script(&script)?;
            let registry = config.registry_from_env()?;
            let client = ElevenLabsClient::from_env().context("ElevenLabs client setup failed")?;

            let synthesizer = SpeechSynthesizer::new(client, registry, config.mix.clone(), out_dir);
            let report = synthesizer.synthesize(&script.dialogue).await?;

            for outcome in report.outcomes() {
                match outcome {
                    LineOutcome::Synthesized(clip) => println!("{}", clip.path.display()),
                    LineOutcome::Skipped {
                        index,
                        speaker,
                        reason,
                    } => eprintln!("skipped line {index} ({speaker}): {reason}"),
                }
            }
        }

        Command::Mix {
            files,
            out_dir,
            crossfade_ms,
        } => {
            let crossfade = crossfade_ms
                .map(Duration::from_millis)
                .unwrap_or_else(|| config.crossfade());
            let mixer = PodcastMixer::new(config.mix.clone(), out_dir);
            let podcast =
                tokio::task::spawn_blocking(move || mixer.mix(&files, crossfade)).await??;
            println!("{}", podcast.path.display());
        }

        Command::Voices => {
            if config.voices.is_empty() {
                bail!("no voices configured");
            }
            for voice in &config.voices {
                let source = match (&voice.voice_id, &voice.voice_id_env) {
                    (Some(id), _) => id.clone(),
                    (None, Some(var)) => format!("${var}"),
                    (None, None) => "<unset>".to_string(),
                };
                println!(
                    "{:<12} {:<28} stability={:.2} similarity={:.2} style={:.2} speaker_boost={} model={}",
                    voice.name,
                    source,
                    voice.stability.value(),
                    voice.similarity_boost.value(),
                    voice.style.value(),
                    voice.use_speaker_boost.is_enabled(),
                    voice.model_id,
                );
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
