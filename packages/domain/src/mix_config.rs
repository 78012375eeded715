//! Audio processing configuration shared by the synthesizer and the mixer.

use serde::{Deserialize, Serialize};

use crate::audio_format::ExportFormat;

/// Encoding and level settings, fixed for a whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioMixConfig {
    /// Container used for per-line clips.
    pub format: ExportFormat,
    pub sample_rate: u32,
    pub channels: u16,
    pub bitrate_kbps: u32,
    /// Peak-normalize each clip after synthesis.
    pub normalize: bool,
    /// Podcast loudness target in LUFS. Carried for downstream tools; not enforced.
    pub target_loudness_lufs: f32,
    /// Voice compression ratio. Carried for downstream tools; not enforced.
    pub compression_ratio: f32,
    /// Gain added after peak normalization, in dB.
    pub post_normalize_gain_db: f32,
    /// Distance below full scale that normalization targets, in dB.
    pub normalize_headroom_db: f32,
}

impl Default for AudioMixConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::Mp3,
            sample_rate: 48_000,
            channels: 2,
            bitrate_kbps: 256,
            normalize: true,
            target_loudness_lufs: -14.0,
            compression_ratio: 2.0,
            post_normalize_gain_db: 4.0,
            normalize_headroom_db: 0.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_documents_fall_back_to_defaults() {
        let config: AudioMixConfig =
            serde_json::from_str(r#"{"format":"wav","normalize":false}"#).unwrap();
        assert_eq!(config.format, ExportFormat::Wav);
        assert!(!config.normalize);
        assert_eq!(config.sample_rate, 48_000);
        assert_eq!(config.post_normalize_gain_db, 4.0);
    }
}
