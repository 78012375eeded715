//! Seam between the synthesizer and a hosted text-to-speech service.

use std::pin::Pin;

use bytes::Bytes;
use futures_core::Stream;

use crate::audio_format::OutputFormat;
use crate::model_id::ModelId;
use crate::text_normalization::TextNormalization;
use crate::voice_error::VoiceError;
use crate::voice_id::VoiceId;
use crate::voice_profile::{VoiceProfile, VoiceSettings};

/// Audio bytes as the provider delivers them, possibly in many chunks.
pub type AudioByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, VoiceError>> + Send>>;

/// Everything the provider needs to voice one line.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechRequest {
    pub text: String,
    pub voice_id: VoiceId,
    pub model_id: ModelId,
    pub output_format: OutputFormat,
    pub text_normalization: TextNormalization,
    pub voice_settings: VoiceSettings,
}

impl SpeechRequest {
    pub fn for_profile(profile: &VoiceProfile, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice_id: profile.voice_id().clone(),
            model_id: profile.model_id.clone(),
            output_format: profile.output_format,
            text_normalization: profile.text_normalization,
            voice_settings: profile.voice_settings(),
        }
    }
}

/// A hosted speech engine.
#[allow(async_fn_in_trait)]
pub trait SpeechProvider {
    /// Start synthesis and return the response body as a byte stream.
    async fn convert(&self, request: &SpeechRequest) -> Result<AudioByteStream, VoiceError>;
}
