//! Speaker boost parameter.
//!
//! Asks the provider to sharpen the resemblance to the reference speaker,
//! at a small latency cost.

use serde::{Deserialize, Serialize};

/// Speaker boost setting (enable/disable).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "bool", into = "bool")]
pub struct SpeakerBoost(bool);

impl SpeakerBoost {
    /// Create a new speaker boost setting.
    pub fn new(enabled: bool) -> Self {
        Self(enabled)
    }

    /// Check if speaker boost is enabled.
    pub fn is_enabled(&self) -> bool {
        self.0
    }
}

impl Default for SpeakerBoost {
    fn default() -> Self {
        Self(true)
    }
}

impl From<bool> for SpeakerBoost {
    fn from(enabled: bool) -> Self {
        Self(enabled)
    }
}

impl From<SpeakerBoost> for bool {
    fn from(value: SpeakerBoost) -> Self {
        value.0
    }
}
