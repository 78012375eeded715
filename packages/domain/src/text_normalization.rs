//! Provider-side text normalization mode (numbers, abbreviations, units).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextNormalization {
    /// Let the model decide.
    #[default]
    Auto,
    On,
    Off,
}

impl TextNormalization {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextNormalization::Auto => "auto",
            TextNormalization::On => "on",
            TextNormalization::Off => "off",
        }
    }
}
