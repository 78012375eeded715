//! Voice stability parameter.
//!
//! Controls how consistent the voice characteristics remain throughout
//! a generated line. Lower values let the host sound livelier from one
//! sentence to the next.

use serde::{Deserialize, Serialize};

/// Voice stability setting between 0.0 and 1.0.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct Stability(f32);

impl Stability {
    /// Create a new stability value.
    ///
    /// - 0.0 = minimal stability (maximum variation between sentences)
    /// - 1.0 = maximum stability (consistent but flatter delivery)
    ///
    /// Values outside this range will be clamped.
    pub fn new(value: f32) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// Get the stability value.
    pub fn value(&self) -> f32 {
        self.0
    }
}

impl Default for Stability {
    fn default() -> Self {
        Self(0.45)
    }
}

impl From<f32> for Stability {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl From<Stability> for f32 {
    fn from(value: Stability) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_out_of_range_values() {
        assert_eq!(Stability::new(1.7).value(), 1.0);
        assert_eq!(Stability::new(-0.2).value(), 0.0);
        assert_eq!(Stability::new(0.35).value(), 0.35);
    }

    #[test]
    fn deserializing_clamps_too() {
        let stability: Stability = serde_json::from_str("3.0").unwrap();
        assert_eq!(stability.value(), 1.0);
    }
}
