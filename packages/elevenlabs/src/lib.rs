//! ElevenLabs text-to-speech client
//!
//! Implements [`podcast_voice_domain::SpeechProvider`] on top of the
//! `/v1/text-to-speech` REST endpoint.
//!
//! # Usage
//!
//! ```no_run
//! use podcast_voice_domain::{SpeechProvider, SpeechRequest, VoiceProfile};
//! use podcast_voice_elevenlabs::ElevenLabsClient;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ElevenLabsClient::from_env()?;
//! let julia = VoiceProfile::new("Julia", "21m00Tcm4TlvDq8ikWAM").with_stability(0.35);
//! let audio = client
//!     .convert(&SpeechRequest::for_profile(&julia, "Welcome back to the show!"))
//!     .await?;
//! # drop(audio);
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod provider;

pub mod endpoints;

pub use client::{API_KEY_VARS, ClientConfig, DEFAULT_BASE_URL, ElevenLabsClient, api_key_from};
pub use error::{Error, Result};
