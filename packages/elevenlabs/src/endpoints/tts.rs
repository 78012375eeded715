//! Text-to-speech endpoint.
//!
//! `POST /v1/text-to-speech/{voice_id}` answers with the encoded audio as
//! a chunked body, which is handed back unbuffered.

use std::pin::Pin;

use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use podcast_voice_domain::{OutputFormat, SpeechRequest, VoiceSettings};

use super::*;

pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send>>;

/// JSON body of a synthesis request.
#[derive(Clone, Debug, Serialize)]
pub struct TextToSpeechBody {
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    model_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    voice_settings: Option<VoiceSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    apply_text_normalization: Option<String>,
}

impl TextToSpeechBody {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model_id: None,
            voice_settings: None,
            apply_text_normalization: None,
        }
    }

    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    pub fn with_voice_settings(mut self, settings: VoiceSettings) -> Self {
        self.voice_settings = Some(settings);
        self
    }

    pub fn with_text_normalization(mut self, mode: impl Into<String>) -> Self {
        self.apply_text_normalization = Some(mode.into());
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct TextToSpeechQuery {
    params: QueryValues,
}

impl TextToSpeechQuery {
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.params.push(("output_format", format.as_str().to_string()));
        self
    }
}

#[derive(Clone, Debug)]
pub struct TextToSpeech {
    voice_id: String,
    body: TextToSpeechBody,
    query: Option<TextToSpeechQuery>,
}

impl TextToSpeech {
    pub fn new(voice_id: impl Into<String>, body: TextToSpeechBody) -> Self {
        Self {
            voice_id: voice_id.into(),
            body,
            query: None,
        }
    }

    pub fn with_query(mut self, query: TextToSpeechQuery) -> Self {
        self.query = Some(query);
        self
    }
}

impl From<&SpeechRequest> for TextToSpeech {
    fn from(request: &SpeechRequest) -> Self {
        let body = TextToSpeechBody::new(request.text.clone())
            .with_model_id(request.model_id.as_str())
            .with_voice_settings(request.voice_settings)
            .with_text_normalization(request.text_normalization.as_str());

        TextToSpeech::new(request.voice_id.id(), body)
            .with_query(TextToSpeechQuery::default().with_output_format(request.output_format))
    }
}

impl ElevenLabsEndpoint for TextToSpeech {
    const PATH: &'static str = "/v1/text-to-speech/:voice_id";

    const METHOD: Method = Method::POST;

    type ResponseBody = ByteStream;

    fn query_params(&self) -> Option<QueryValues> {
        self.query.as_ref().map(|q| q.params.clone())
    }

    fn path_params(&self) -> Vec<(&'static str, &str)> {
        vec![(":voice_id", self.voice_id.as_str())]
    }

    async fn request_body(&self) -> Result<RequestBody> {
        Ok(RequestBody::Json(serde_json::to_vec(&self.body)?))
    }

    async fn response_body(self, resp: Response) -> Result<Self::ResponseBody> {
        Ok(Box::pin(resp.bytes_stream().map(|chunk| chunk.map_err(Error::from))))
    }
}

#[cfg(test)]
mod tests {
    use podcast_voice_domain::{TextNormalization, VoiceProfile};
    use serde_json::json;

    use super::*;

    fn request() -> SpeechRequest {
        let profile = VoiceProfile::new("Guido", "voice-guido")
            .with_stability(0.4)
            .with_similarity(0.75)
            .with_style(0.6)
            .with_text_normalization(TextNormalization::On);
        SpeechRequest::for_profile(&profile, "Hello there")
    }

    #[test]
    fn url_carries_voice_and_output_format() {
        let endpoint = TextToSpeech::from(&request());
        let url = endpoint.url("https://api.elevenlabs.io").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.elevenlabs.io/v1/text-to-speech/voice-guido?output_format=mp3_44100_128"
        );
    }

    #[test]
    fn body_matches_wire_shape() {
        let endpoint = TextToSpeech::from(&request());
        let body: serde_json::Value =
            serde_json::from_slice(&serde_json::to_vec(&endpoint.body).unwrap()).unwrap();
        assert_eq!(
            body,
            json!({
                "text": "Hello there",
                "model_id": "eleven_multilingual_v2",
                "voice_settings": {
                    "stability": 0.4,
                    "similarity_boost": 0.75,
                    "style": 0.6,
                    "use_speaker_boost": true
                },
                "apply_text_normalization": "on"
            })
        );
    }

    #[test]
    fn bad_base_url_is_reported() {
        let endpoint = TextToSpeech::from(&request());
        assert!(matches!(
            endpoint.url("not a url"),
            Err(Error::InvalidUrl(_))
        ));
    }
}
