//! Synthesis configuration.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Tunable tolerances for [`Synthesizer`](crate::Synthesizer).
///
/// The defaults reproduce the reference circuits exactly. Loading from JSON
/// fills any missing field with its default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisOptions {
    /// Tolerance used when deciding that a source and a target axis coincide.
    pub overlap_tolerance: f64,
    /// Period modulo which source and target axes are compared.
    pub overlap_modulus: f64,
    /// Largest first alcove component for which the first native interaction
    /// is placed without a reflect-and-shift wrapper.
    pub first_hop_threshold: f64,
    /// Largest magnitude allowed on the second and third canonical axes of a
    /// catalog entry.
    pub xx_tolerance: f64,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            overlap_tolerance: 1e-2,
            overlap_modulus: PI,
            first_hop_threshold: 0.25,
            xx_tolerance: 1e-6,
        }
    }
}

impl SynthesisOptions {
    /// Create the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shared-axis tolerance.
    #[must_use]
    pub fn with_overlap_tolerance(mut self, tolerance: f64) -> Self {
        self.overlap_tolerance = tolerance;
        self
    }

    /// Set the shared-axis modulus.
    #[must_use]
    pub fn with_overlap_modulus(mut self, modulus: f64) -> Self {
        self.overlap_modulus = modulus;
        self
    }

    /// Set the first-hop threshold.
    #[must_use]
    pub fn with_first_hop_threshold(mut self, threshold: f64) -> Self {
        self.first_hop_threshold = threshold;
        self
    }

    /// Set the XX-type check tolerance.
    #[must_use]
    pub fn with_xx_tolerance(mut self, tolerance: f64) -> Self {
        self.xx_tolerance = tolerance;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = SynthesisOptions::default();
        assert_eq!(options.overlap_tolerance, 1e-2);
        assert_eq!(options.overlap_modulus, PI);
        assert_eq!(options.first_hop_threshold, 0.25);
        assert_eq!(options.xx_tolerance, 1e-6);
    }

    #[test]
    fn test_builder() {
        let options = SynthesisOptions::new()
            .with_overlap_tolerance(1e-3)
            .with_first_hop_threshold(0.2);
        assert_eq!(options.overlap_tolerance, 1e-3);
        assert_eq!(options.first_hop_threshold, 0.2);
        assert_eq!(options.overlap_modulus, PI);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let options: SynthesisOptions =
            serde_json::from_str(r#"{ "overlap_tolerance": 0.005 }"#).unwrap();
        assert_eq!(options.overlap_tolerance, 0.005);
        assert_eq!(options.xx_tolerance, 1e-6);

        let json = serde_json::to_string(&options).unwrap();
        let back: SynthesisOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, options);
    }
}
