//! # Podcast Voice
//!
//! Turns a two-host dialogue script into a finished episode.
//!
//! 1. [`SpeechSynthesizer`] voices each line with the speaker's registered
//!    profile and writes one clip per line.
//! 2. [`PodcastMixer`] joins the clips with a 200 ms gap and a short
//!    crossfade into `podcast_final.mp3`.
//!
//! [`episode::produce`] runs both against a timestamped run directory.

pub mod audio;
pub mod config;
pub mod episode;
pub mod layout;
pub mod metadata;
pub mod mixer;
pub mod synthesizer;

pub use config::{ConfigError, PodcastConfig, VoiceEntry};
pub use episode::{EpisodeRun, ProduceError, produce, read_script};
pub use layout::RunDirectories;
pub use metadata::AudioGeneration;
pub use mixer::{DEFAULT_CROSSFADE, MixError, MixOutcome, PodcastMixer, SILENCE_GAP};
pub use synthesizer::{LineOutcome, SkipReason, SpeechSynthesizer, SynthesisError, SynthesisReport};
