//! [`SpeechProvider`] backed by the ElevenLabs REST API.

use futures_util::StreamExt;
use podcast_voice_domain::{AudioByteStream, SpeechProvider, SpeechRequest, VoiceError};
use tracing::debug;

use crate::client::ElevenLabsClient;
use crate::endpoints::tts::TextToSpeech;

impl SpeechProvider for ElevenLabsClient {
    async fn convert(&self, request: &SpeechRequest) -> Result<AudioByteStream, VoiceError> {
        debug!(
            voice_id = request.voice_id.id(),
            model_id = request.model_id.as_str(),
            output_format = request.output_format.as_str(),
            chars = request.text.chars().count(),
            "requesting speech"
        );

        let stream = self
            .hit(TextToSpeech::from(request))
            .await
            .map_err(|e| VoiceError::Provider(e.to_string()))?;

        Ok(Box::pin(stream.map(|chunk| {
            chunk.map_err(|e| VoiceError::Stream(e.to_string()))
        })))
    }
}
