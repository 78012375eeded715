//! # Podcast Voice Domain
//!
//! Shared domain objects for the podcast-voice workspace.
//!
//! The synthesizer, the mixer and every speech provider speak in these
//! types, so provider crates never depend on the audio pipeline and the
//! pipeline never depends on a concrete provider.

pub mod audio_format;
pub mod clip;
pub mod dialogue;
pub mod mix_config;
pub mod model_id;
pub mod similarity;
pub mod speaker_boost;
pub mod speech_provider;
pub mod stability;
pub mod style_exaggeration;
pub mod text_normalization;
pub mod voice_error;
pub mod voice_id;
pub mod voice_profile;

pub use audio_format::{ExportFormat, OutputFormat};
pub use clip::{FinalPodcast, SynthesizedClip};
pub use dialogue::{DialogueLine, PodcastScript};
pub use mix_config::AudioMixConfig;
pub use model_id::ModelId;
pub use speech_provider::{AudioByteStream, SpeechProvider, SpeechRequest};
pub use text_normalization::TextNormalization;
pub use voice_error::VoiceError;
pub use voice_id::VoiceId;
pub use voice_profile::{VoiceProfile, VoiceRegistry, VoiceSettings};

// Re-export value types
pub use similarity::*;
pub use speaker_boost::*;
pub use stability::*;
pub use style_exaggeration::*;

/// Prelude module containing commonly used types.
pub mod prelude {
    pub use crate::{
        AudioByteStream, AudioMixConfig, DialogueLine, ExportFormat, FinalPodcast, ModelId,
        OutputFormat, PodcastScript, SpeechProvider, SpeechRequest, SynthesizedClip,
        TextNormalization, VoiceError, VoiceId, VoiceProfile, VoiceRegistry, VoiceSettings,
    };
}
