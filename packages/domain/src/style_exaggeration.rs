//! Style exaggeration parameter.
//!
//! Controls how strongly the voice style and emotions are expressed.
//! Higher values create more dramatic, expressive speech.

use serde::{Deserialize, Serialize};

/// Style exaggeration setting between 0.0 and 1.0.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct StyleExaggeration(f32);

impl StyleExaggeration {
    /// Create a new style exaggeration value.
    ///
    /// - 0.0 = minimal exaggeration (subtle expression)
    /// - 1.0 = maximum exaggeration (dramatic expression)
    ///
    /// Values outside this range will be clamped.
    pub fn new(value: f32) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// Get the style exaggeration value.
    pub fn value(&self) -> f32 {
        self.0
    }
}

impl Default for StyleExaggeration {
    fn default() -> Self {
        Self(0.65)
    }
}

impl From<f32> for StyleExaggeration {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl From<StyleExaggeration> for f32 {
    fn from(value: StyleExaggeration) -> Self {
        value.0
    }
}
