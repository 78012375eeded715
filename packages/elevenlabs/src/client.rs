use crate::endpoints::{ElevenLabsEndpoint, RequestBody};
use crate::error::{Error, Result};
use reqwest::{Method, header::CONTENT_TYPE};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io";

const XI_API_KEY_HEADER: &str = "xi-api-key";
const APPLICATION_JSON: &str = "application/json";

/// Environment variables searched, in order, for the API key.
pub const API_KEY_VARS: [&str; 3] = [
    "ELEVENLABS_API_KEY",
    "ELEVEN_API_KEY",
    "ELEVEN_LABS_API_KEY",
];

/// ElevenLabs client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme and host the endpoints are resolved against
    pub base_url: String,
    /// TCP + TLS handshake limit
    pub connect_timeout: Duration,
    /// How long an idle pooled connection is kept
    pub pool_idle_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            pool_idle_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Clone)]
pub struct ElevenLabsClient {
    inner: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for ElevenLabsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElevenLabsClient")
            .field("api_key", &mask_key(&self.api_key))
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ElevenLabsClient {
    pub fn from_env() -> Result<Self> {
        Self::from_env_with_config(ClientConfig::default())
    }

    pub fn from_env_with_config(config: ClientConfig) -> Result<Self> {
        let api_key = api_key_from(|name| std::env::var(name).ok())?;
        Self::new_with_config(api_key, config)
    }

    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::new_with_config(api_key, ClientConfig::default())
    }

    pub fn new_with_config(api_key: impl Into<String>, config: ClientConfig) -> Result<Self> {
        // Install default crypto provider for rustls (ignore if already installed)
        let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

        let mut root_store = rustls::RootCertStore::empty();
        root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

        let mut tls_config = rustls::ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth();
        tls_config.alpn_protocols = vec![b"h2".to_vec(), b"http/1.1".to_vec()];

        let client = reqwest::Client::builder()
            .use_preconfigured_tls(tls_config)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .build()?;

        let api_key = api_key.into();
        debug!(api_key = %mask_key(&api_key), base_url = %config.base_url, "ElevenLabs client ready");

        Ok(Self {
            inner: client,
            api_key,
            base_url: config.base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn hit<T: ElevenLabsEndpoint>(&self, endpoint: T) -> Result<T::ResponseBody> {
        let url = endpoint.url(&self.base_url)?;
        debug!(method = %T::METHOD, %url, "calling ElevenLabs");

        let mut builder = self
            .inner
            .request(T::METHOD, url)
            .header(XI_API_KEY_HEADER, &self.api_key);

        if matches!(T::METHOD, Method::POST | Method::PATCH) {
            let request_body = endpoint.request_body().await?;
            builder = match request_body {
                RequestBody::Json(json) => builder.header(CONTENT_TYPE, APPLICATION_JSON).body(json),
                RequestBody::Empty => return Err(Error::MissingRequestBody),
            };
        }

        let resp = builder.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::HttpError {
                status: status.as_u16(),
                body,
            });
        }

        endpoint.response_body(resp).await
    }
}

/// First non-blank key among [`API_KEY_VARS`], read through `lookup`.
pub fn api_key_from(lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
    API_KEY_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
        .ok_or(Error::ApiKeyNotFound)
}

/// First eight and last four characters, enough to tell keys apart in logs.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 12 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail} (length: {})", chars.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn api_key_lookup_follows_variable_order() {
        let env: HashMap<&str, &str> =
            HashMap::from([("ELEVEN_API_KEY", "second"), ("ELEVEN_LABS_API_KEY", "third")]);
        let key = api_key_from(|name| env.get(name).map(|v| v.to_string())).unwrap();
        assert_eq!(key, "second");
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let result = api_key_from(|name| (name == "ELEVENLABS_API_KEY").then(|| "  ".to_string()));
        assert!(matches!(result, Err(Error::ApiKeyNotFound)));
    }

    #[test]
    fn masked_key_hides_the_middle() {
        assert_eq!(mask_key("short"), "*****");
        assert_eq!(
            mask_key("sk_1234567890abcdef"),
            "sk_12345...cdef (length: 19)"
        );
    }
}
