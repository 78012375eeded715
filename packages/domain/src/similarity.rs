//! Voice similarity boost parameter.
//!
//! Controls how closely the synthesized voice sticks to the reference
//! voice. Higher values keep a host recognisable across the episode.

use serde::{Deserialize, Serialize};

/// Voice similarity boost between 0.0 and 1.0.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct Similarity(f32);

impl Similarity {
    /// Create a new similarity value, clamped to 0.0..=1.0.
    pub fn new(value: f32) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// Get the similarity value.
    pub fn value(&self) -> f32 {
        self.0
    }
}

impl Default for Similarity {
    fn default() -> Self {
        Self(0.85)
    }
}

impl From<f32> for Similarity {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl From<Similarity> for f32 {
    fn from(value: Similarity) -> Self {
        value.0
    }
}
