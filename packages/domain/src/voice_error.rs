//! Error raised by speech providers.
use thiserror::Error;

/// Failure reported through [`SpeechProvider`](crate::SpeechProvider).
#[derive(Debug, Clone, Error)]
pub enum VoiceError {
    /// The speech provider rejected or failed the request.
    #[error("provider: {0}")]
    Provider(String),
    /// The provider's audio stream broke off mid-transfer.
    #[error("stream: {0}")]
    Stream(String),
}
