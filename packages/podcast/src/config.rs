//! TOML configuration for a podcast run.
//!
//! Voice ids are secrets in practice, so entries usually name the
//! environment variable that holds them rather than the id itself.

use std::path::{Path, PathBuf};
use std::time::Duration;

use podcast_voice_domain::{
    AudioMixConfig, ModelId, OutputFormat, Similarity, SpeakerBoost, Stability,
    StyleExaggeration, TextNormalization, VoiceProfile, VoiceRegistry,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("voice '{speaker}' has neither voice_id nor voice_id_env")]
    NoVoiceSource { speaker: String },

    #[error("voice id for '{speaker}' not set; export {var}")]
    MissingVoiceId { speaker: String, var: String },

    #[error("voice '{0}' is configured more than once")]
    DuplicateVoice(String),

    #[error("no voices configured")]
    NoVoices,

    #[error("mix channels must be 1 or 2, got {0}")]
    UnsupportedChannels(u16),

    #[error("mix sample rate must be positive")]
    ZeroSampleRate,
}

/// One speaker entry under `[[voices]]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceEntry {
    pub name: String,
    /// Literal provider voice id. Takes precedence over `voice_id_env`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<String>,
    /// Environment variable holding the voice id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_id_env: Option<String>,
    #[serde(default)]
    pub stability: Stability,
    #[serde(default)]
    pub similarity_boost: Similarity,
    #[serde(default)]
    pub style: StyleExaggeration,
    #[serde(default)]
    pub use_speaker_boost: SpeakerBoost,
    #[serde(default)]
    pub model_id: ModelId,
    #[serde(default)]
    pub output_format: OutputFormat,
    #[serde(default)]
    pub apply_text_normalization: TextNormalization,
}

impl VoiceEntry {
    fn from_env(name: &str, var: &str, stability: f32, similarity: f32, style: f32) -> Self {
        Self {
            name: name.to_string(),
            voice_id: None,
            voice_id_env: Some(var.to_string()),
            stability: Stability::new(stability),
            similarity_boost: Similarity::new(similarity),
            style: StyleExaggeration::new(style),
            use_speaker_boost: SpeakerBoost::new(true),
            model_id: ModelId::default(),
            output_format: OutputFormat::default(),
            apply_text_normalization: TextNormalization::default(),
        }
    }

    fn resolve(&self, lookup: &impl Fn(&str) -> Option<String>) -> Result<VoiceProfile, ConfigError> {
        let literal = self
            .voice_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string);

        let voice_id = match (literal, &self.voice_id_env) {
            (Some(id), _) => id,
            (None, Some(var)) => lookup(var)
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .ok_or_else(|| ConfigError::MissingVoiceId {
                    speaker: self.name.clone(),
                    var: var.clone(),
                })?,
            (None, None) => {
                return Err(ConfigError::NoVoiceSource {
                    speaker: self.name.clone(),
                });
            }
        };

        let mut profile = VoiceProfile::new(self.name.clone(), voice_id)
            .with_model(self.model_id.clone())
            .with_output_format(self.output_format)
            .with_text_normalization(self.apply_text_normalization);
        profile.stability = self.stability;
        profile.similarity = self.similarity_boost;
        profile.style = self.style;
        profile.speaker_boost = self.use_speaker_boost;
        Ok(profile)
    }
}

/// Whole-run settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PodcastConfig {
    /// Parent of the timestamped run directories.
    pub output_root: PathBuf,
    pub crossfade_ms: u64,
    pub mix: AudioMixConfig,
    pub voices: Vec<VoiceEntry>,
}

impl Default for PodcastConfig {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from("outputs"),
            crossfade_ms: 50,
            mix: AudioMixConfig::default(),
            voices: vec![
                VoiceEntry::from_env("Julia", "CLAUDIA_VOICE_ID", 0.35, 0.75, 0.65),
                VoiceEntry::from_env("Guido", "BEN_VOICE_ID", 0.4, 0.75, 0.6),
            ],
        }
    }
}

impl PodcastConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// `path` when given, built-in defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.voices.is_empty() {
            return Err(ConfigError::NoVoices);
        }
        if !(1..=2).contains(&self.mix.channels) {
            return Err(ConfigError::UnsupportedChannels(self.mix.channels));
        }
        if self.mix.sample_rate == 0 {
            return Err(ConfigError::ZeroSampleRate);
        }
        Ok(())
    }

    pub fn crossfade(&self) -> Duration {
        Duration::from_millis(self.crossfade_ms)
    }

    /// Build the immutable registry, reading voice ids through `lookup`.
    pub fn resolve_registry(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<VoiceRegistry, ConfigError> {
        let mut seen = std::collections::HashSet::new();
        let mut profiles = Vec::with_capacity(self.voices.len());
        for entry in &self.voices {
            if !seen.insert(entry.name.as_str()) {
                return Err(ConfigError::DuplicateVoice(entry.name.clone()));
            }
            profiles.push(entry.resolve(&lookup)?);
        }
        Ok(VoiceRegistry::new(profiles))
    }

    /// [`resolve_registry`](Self::resolve_registry) against the process environment.
    pub fn registry_from_env(&self) -> Result<VoiceRegistry, ConfigError> {
        self.resolve_registry(|var| std::env::var(var).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_describe_the_two_hosts() {
        let registry = PodcastConfig::default()
            .resolve_registry(env(&[("CLAUDIA_VOICE_ID", "claudia"), ("BEN_VOICE_ID", "ben")]))
            .unwrap();

        let julia = registry.get("Julia").unwrap();
        assert_eq!(julia.voice_id().id(), "claudia");
        assert_eq!(julia.stability.value(), 0.35);
        assert_eq!(julia.similarity.value(), 0.75);
        assert_eq!(julia.style.value(), 0.65);

        let guido = registry.get("Guido").unwrap();
        assert_eq!(guido.voice_id().id(), "ben");
        assert_eq!(guido.stability.value(), 0.4);
        assert_eq!(guido.style.value(), 0.6);
        assert!(guido.speaker_boost.is_enabled());
    }

    #[test]
    fn missing_voice_id_names_the_variable() {
        let err = PodcastConfig::default()
            .resolve_registry(env(&[("CLAUDIA_VOICE_ID", "claudia")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingVoiceId { ref speaker, ref var } if speaker == "Guido" && var == "BEN_VOICE_ID"
        ));
    }

    #[test]
    fn toml_overrides_merge_with_defaults() {
        let config: PodcastConfig = toml::from_str(
            r#"
            crossfade_ms = 80

            [mix]
            format = "wav"
            post_normalize_gain_db = 2.5

            [[voices]]
            name = "Ada"
            voice_id = "ada-voice"
            stability = 1.7
            model_id = "eleven_flash_v2_5"
            output_format = "pcm_24000"
            "#,
        )
        .unwrap();
        config.validate().unwrap();

        assert_eq!(config.crossfade(), Duration::from_millis(80));
        assert_eq!(config.output_root, PathBuf::from("outputs"));
        assert_eq!(config.mix.post_normalize_gain_db, 2.5);
        assert_eq!(config.mix.sample_rate, 48_000);

        let registry = config.resolve_registry(|_| None).unwrap();
        let ada = registry.get("Ada").unwrap();
        assert_eq!(ada.stability.value(), 1.0);
        assert_eq!(ada.model_id, ModelId::FlashV2_5);
        assert_eq!(ada.output_format, OutputFormat::Pcm24000);
        assert_eq!(ada.similarity, Similarity::default());
    }

    #[test]
    fn duplicate_voices_are_rejected() {
        let mut config = PodcastConfig::default();
        config.voices.push(config.voices[0].clone());
        let err = config.resolve_registry(|_| Some("id".into())).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateVoice(ref name) if name == "Julia"));
    }

    #[test]
    fn surround_mix_is_rejected() {
        let mut config = PodcastConfig::default();
        config.mix.channels = 6;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnsupportedChannels(6))
        ));
    }

    #[test]
    fn load_reports_parse_errors_with_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("podcast.toml");
        std::fs::write(&path, "crossfade_ms = \"soon\"").unwrap();
        assert!(matches!(
            PodcastConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
