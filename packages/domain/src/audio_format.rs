//! Audio encodings negotiated with the synthesis provider.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Output format requested from the provider (`output_format` query value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFormat {
    /// MP3 22.05 kHz, 32 kbps CBR.
    #[serde(rename = "mp3_22050_32")]
    Mp3_22050_32,
    /// MP3 44.1 kHz, 64 kbps CBR.
    #[serde(rename = "mp3_44100_64")]
    Mp3_44100_64,
    /// MP3 44.1 kHz, 96 kbps CBR.
    #[serde(rename = "mp3_44100_96")]
    Mp3_44100_96,
    /// MP3 44.1 kHz, 128 kbps CBR.
    #[serde(rename = "mp3_44100_128")]
    Mp3_44100_128,
    /// MP3 44.1 kHz, 192 kbps CBR.
    #[serde(rename = "mp3_44100_192")]
    Mp3_44100_192,
    /// 16-bit PCM at 16 kHz, mono, headerless.
    #[serde(rename = "pcm_16000")]
    Pcm16000,
    /// 16-bit PCM at 22.05 kHz, mono, headerless.
    #[serde(rename = "pcm_22050")]
    Pcm22050,
    /// 16-bit PCM at 24 kHz, mono, headerless.
    #[serde(rename = "pcm_24000")]
    Pcm24000,
    /// 16-bit PCM at 44.1 kHz, mono, headerless.
    #[serde(rename = "pcm_44100")]
    Pcm44100,
}

impl OutputFormat {
    /// Wire identifier sent as the `output_format` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Mp3_22050_32 => "mp3_22050_32",
            OutputFormat::Mp3_44100_64 => "mp3_44100_64",
            OutputFormat::Mp3_44100_96 => "mp3_44100_96",
            OutputFormat::Mp3_44100_128 => "mp3_44100_128",
            OutputFormat::Mp3_44100_192 => "mp3_44100_192",
            OutputFormat::Pcm16000 => "pcm_16000",
            OutputFormat::Pcm22050 => "pcm_22050",
            OutputFormat::Pcm24000 => "pcm_24000",
            OutputFormat::Pcm44100 => "pcm_44100",
        }
    }

    /// Sample rate of the returned audio in Hz.
    pub fn sample_rate(&self) -> u32 {
        match self {
            OutputFormat::Mp3_22050_32 | OutputFormat::Pcm22050 => 22_050,
            OutputFormat::Pcm16000 => 16_000,
            OutputFormat::Pcm24000 => 24_000,
            _ => 44_100,
        }
    }

    /// Raw PCM formats carry no container and must be wrapped before decoding.
    pub fn is_raw_pcm(&self) -> bool {
        matches!(
            self,
            OutputFormat::Pcm16000
                | OutputFormat::Pcm22050
                | OutputFormat::Pcm24000
                | OutputFormat::Pcm44100
        )
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Mp3_44100_128
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Container written to local storage for clips and the final episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Mp3,
    Wav,
}

impl ExportFormat {
    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Mp3 => "mp3",
            ExportFormat::Wav => "wav",
        }
    }
}

impl Default for ExportFormat {
    fn default() -> Self {
        ExportFormat::Mp3
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
