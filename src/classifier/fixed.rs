//! Deterministic classifier used by tests and demos.
//!
//! Returns a preset score vector regardless of input, so the rest of the
//! pipeline can be exercised without a model artifact on disk.

use crate::classifier::Classifier;
use crate::error::PipelineError;

pub struct FixedClassifier {
    scores: Vec<f32>,
}

impl FixedClassifier {
    pub fn new(scores: Vec<f32>) -> Self {
        FixedClassifier { scores }
    }
}

impl Classifier for FixedClassifier {
    fn class_scores(&self, _pixels: &[f32]) -> Result<Vec<f32>, PipelineError> {
        Ok(self.scores.clone())
    }
}
