//! Dialogue lines produced by the script-writing stage.

use serde::{Deserialize, Serialize};

/// One spoken turn. Identity is its position in the script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueLine {
    #[serde(default)]
    pub speaker: String,
    #[serde(default)]
    pub text: String,
}

impl DialogueLine {
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
        }
    }
}

/// Ordered script as written to disk by the upstream pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodcastScript {
    pub dialogue: Vec<DialogueLine>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_deserialize_as_empty() {
        let script: PodcastScript =
            serde_json::from_str(r#"{"dialogue":[{"speaker":"Julia"},{"text":"hi"}]}"#).unwrap();
        assert_eq!(script.dialogue[0].text, "");
        assert_eq!(script.dialogue[1].speaker, "");
    }
}
