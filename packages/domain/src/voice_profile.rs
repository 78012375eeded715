//! Named speaker configuration and the registry that owns them.

use std::collections::HashMap;

use crate::audio_format::OutputFormat;
use crate::model_id::ModelId;
use crate::similarity::Similarity;
use crate::speaker_boost::SpeakerBoost;
use crate::stability::Stability;
use crate::style_exaggeration::StyleExaggeration;
use crate::text_normalization::TextNormalization;
use crate::voice_id::VoiceId;

/// Synthesis parameters for one host.
///
/// Built once at startup and never mutated; the synthesizer only reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceProfile {
    name: String,
    voice_id: VoiceId,
    pub stability: Stability,
    pub similarity: Similarity,
    pub style: StyleExaggeration,
    pub speaker_boost: SpeakerBoost,
    pub model_id: ModelId,
    pub output_format: OutputFormat,
    pub text_normalization: TextNormalization,
}

impl VoiceProfile {
    /// Profile with provider defaults for every tunable parameter.
    pub fn new(name: impl Into<String>, voice_id: impl Into<VoiceId>) -> Self {
        Self {
            name: name.into(),
            voice_id: voice_id.into(),
            stability: Stability::default(),
            similarity: Similarity::default(),
            style: StyleExaggeration::default(),
            speaker_boost: SpeakerBoost::default(),
            model_id: ModelId::default(),
            output_format: OutputFormat::default(),
            text_normalization: TextNormalization::default(),
        }
    }

    pub fn with_stability(mut self, value: f32) -> Self {
        self.stability = Stability::new(value);
        self
    }

    pub fn with_similarity(mut self, value: f32) -> Self {
        self.similarity = Similarity::new(value);
        self
    }

    pub fn with_style(mut self, value: f32) -> Self {
        self.style = StyleExaggeration::new(value);
        self
    }

    pub fn with_speaker_boost(mut self, enabled: bool) -> Self {
        self.speaker_boost = SpeakerBoost::new(enabled);
        self
    }

    pub fn with_model(mut self, model_id: ModelId) -> Self {
        self.model_id = model_id;
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn with_text_normalization(mut self, mode: TextNormalization) -> Self {
        self.text_normalization = mode;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn voice_id(&self) -> &VoiceId {
        &self.voice_id
    }

    /// The `voice_settings` bundle sent with every request for this voice.
    pub fn voice_settings(&self) -> VoiceSettings {
        VoiceSettings {
            stability: self.stability.value(),
            similarity_boost: self.similarity.value(),
            style: self.style.value(),
            use_speaker_boost: self.speaker_boost.is_enabled(),
        }
    }
}

/// Voice settings as the provider expects them on the wire.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
    pub style: f32,
    pub use_speaker_boost: bool,
}

/// Immutable mapping from speaker name to profile.
#[derive(Debug, Clone, Default)]
pub struct VoiceRegistry {
    voices: HashMap<String, VoiceProfile>,
}

impl VoiceRegistry {
    /// Build a registry from profiles; a later profile with the same name wins.
    pub fn new(profiles: impl IntoIterator<Item = VoiceProfile>) -> Self {
        let voices = profiles
            .into_iter()
            .map(|profile| (profile.name().to_string(), profile))
            .collect();
        Self { voices }
    }

    /// Exact, case-sensitive lookup by speaker name.
    pub fn get(&self, speaker: &str) -> Option<&VoiceProfile> {
        self.voices.get(speaker)
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    /// Profiles sorted by speaker name.
    pub fn profiles(&self) -> Vec<&VoiceProfile> {
        let mut profiles: Vec<_> = self.voices.values().collect();
        profiles.sort_by(|a, b| a.name().cmp(b.name()));
        profiles
    }
}

impl FromIterator<VoiceProfile> for VoiceRegistry {
    fn from_iter<I: IntoIterator<Item = VoiceProfile>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_bundle_reflects_profile() {
        let profile = VoiceProfile::new("Julia", "voice-julia")
            .with_stability(0.35)
            .with_similarity(0.75)
            .with_style(0.65)
            .with_speaker_boost(true);

        let settings = profile.voice_settings();
        assert_eq!(settings.stability, 0.35);
        assert_eq!(settings.similarity_boost, 0.75);
        assert_eq!(settings.style, 0.65);
        assert!(settings.use_speaker_boost);
    }

    #[test]
    fn registry_lookup_is_case_sensitive() {
        let registry: VoiceRegistry = [
            VoiceProfile::new("Julia", "a"),
            VoiceProfile::new("Guido", "b"),
        ]
        .into_iter()
        .collect();

        assert_eq!(registry.len(), 2);
        assert!(registry.get("Julia").is_some());
        assert!(registry.get("julia").is_none());
        assert_eq!(registry.profiles()[0].name(), "Guido");
    }
}
