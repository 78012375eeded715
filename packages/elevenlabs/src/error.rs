use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("reqwest error: {0}")]
    ReqwestError(#[from] reqwest::Error),
    #[error("serde error: {0}")]
    SerdeError(#[from] serde_json::Error),
    #[error("http error {status}: {body}")]
    HttpError { status: u16, body: String },
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("request must have a body")]
    MissingRequestBody,
    #[error(
        "No ElevenLabs API key found. Set ELEVENLABS_API_KEY, ELEVEN_API_KEY, or ELEVEN_LABS_API_KEY environment variable"
    )]
    ApiKeyNotFound,
}

pub type Result<T> = std::result::Result<T, Error>;
