//! End-to-end inference pipeline: decode → normalize → classify → interpret.
//!
//! Every call is independent; the pipeline holds only the immutable model
//! and its normalization convention, so one instance can be shared read-only
//! across request threads.

use crate::classifier::Classifier;
use crate::error::PipelineError;
use crate::interpret::{interpret, Prediction};
use crate::preprocess::{decode_base64_image, image_bytes_to_rgb_input, Normalization};

pub struct Pipeline {
    classifier: Box<dyn Classifier>,
    normalization: Normalization,
}

impl Pipeline {
    pub fn new(classifier: Box<dyn Classifier>, normalization: Normalization) -> Self {
        Pipeline { classifier, normalization }
    }

    /// Classifies raw image bytes (multipart upload, file on disk).
    pub fn predict_image_bytes(&self, bytes: &[u8]) -> Result<Prediction, PipelineError> {
        let pixels = image_bytes_to_rgb_input(bytes, self.normalization)?;
        let scores = self.classifier.class_scores(&pixels)?;
        interpret(&scores)
    }

    /// Classifies a base64 payload, with or without a data-URI prefix.
    pub fn predict_base64(&self, payload: &str) -> Result<Prediction, PipelineError> {
        let bytes = decode_base64_image(payload)?;
        self.predict_image_bytes(&bytes)
    }
}
