//! Confidence scoring seam
//!
//! The keyword agents have no calibrated model behind them. The default
//! [`RandomScorer`] draws a value from a fixed range so the UI has something
//! to display; those numbers are NOT authoritative. Swap in a real scorer
//! (or [`FixedScorer`] in tests) through [`ConfidenceScorer`].

use crate::classifier::{clamp_confidence, ClassifierKind};
use rand::Rng;

/// Produces a confidence for one classifier decision
pub trait ConfidenceScorer: Send + Sync {
    /// Score a decision; values outside [0, 1] are clamped by the caller
    fn score(&self, kind: ClassifierKind, text: &str) -> f32;
}

/// Uniform pseudo-random confidence in `[min, max]`
#[derive(Debug, Clone, Copy)]
pub struct RandomScorer {
    min: f32,
    max: f32,
}

impl RandomScorer {
    pub fn new(min: f32, max: f32) -> Self {
        let min = clamp_confidence(min);
        let max = clamp_confidence(max);
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }
}

impl Default for RandomScorer {
    fn default() -> Self {
        Self::new(0.80, 0.97)
    }
}

impl ConfidenceScorer for RandomScorer {
    fn score(&self, _kind: ClassifierKind, _text: &str) -> f32 {
        if self.min == self.max {
            return self.min;
        }
        rand::thread_rng().gen_range(self.min..=self.max)
    }
}

/// Always returns the same confidence
#[derive(Debug, Clone, Copy)]
pub struct FixedScorer(pub f32);

impl ConfidenceScorer for FixedScorer {
    fn score(&self, _kind: ClassifierKind, _text: &str) -> f32 {
        self.0
    }
}
