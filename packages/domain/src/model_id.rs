//! Provider-specific synthesis model identifiers.
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ModelId {
    /// Multilingual model v2.
    MultilingualV2,
    /// Flash model v2.5 (low latency).
    FlashV2_5,
    /// Turbo model v2.5 (balanced speed/quality).
    TurboV2_5,
    /// English-only model v1.
    MonolingualV1,
    /// Any other identifier the provider accepts.
    Custom(String),
}

impl ModelId {
    /// Wire identifier sent as `model_id`.
    pub fn as_str(&self) -> &str {
        match self {
            ModelId::MultilingualV2 => "eleven_multilingual_v2",
            ModelId::FlashV2_5 => "eleven_flash_v2_5",
            ModelId::TurboV2_5 => "eleven_turbo_v2_5",
            ModelId::MonolingualV1 => "eleven_monolingual_v1",
            ModelId::Custom(id) => id,
        }
    }
}

impl Default for ModelId {
    fn default() -> Self {
        ModelId::MultilingualV2
    }
}

impl From<String> for ModelId {
    fn from(id: String) -> Self {
        match id.as_str() {
            "eleven_multilingual_v2" => ModelId::MultilingualV2,
            "eleven_flash_v2_5" => ModelId::FlashV2_5,
            "eleven_turbo_v2_5" => ModelId::TurboV2_5,
            "eleven_monolingual_v1" => ModelId::MonolingualV1,
            _ => ModelId::Custom(id),
        }
    }
}

impl From<ModelId> for String {
    fn from(id: ModelId) -> Self {
        id.as_str().to_string()
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_ids_round_trip_through_strings() {
        let id = ModelId::from("eleven_turbo_v2_5".to_string());
        assert_eq!(id, ModelId::TurboV2_5);
        assert_eq!(String::from(id), "eleven_turbo_v2_5");
    }

    #[test]
    fn unknown_ids_are_kept_verbatim() {
        let id = ModelId::from("eleven_v3".to_string());
        assert_eq!(id.as_str(), "eleven_v3");
    }
}
