//! ONNX model backend.
//!
//! Loads a pretrained classifier artifact once at startup and keeps the
//! optimized plan immutable thereafter; `run` borrows the plan, so one
//! instance can serve concurrent request threads without locking.

use std::path::Path;

use tract_onnx::prelude::*;

use crate::classifier::Classifier;
use crate::error::PipelineError;
use crate::preprocess::{INPUT_HEIGHT, INPUT_PIXELS, INPUT_WIDTH};

pub struct OnnxClassifier {
    plan: SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>,
}

impl OnnxClassifier {
    /// Loads and optimizes an ONNX model for the fixed (1, 224, 224, 3)
    /// NHWC f32 input the waste classifiers are exported with.
    pub fn load(path: impl AsRef<Path>) -> TractResult<Self> {
        let plan = tract_onnx::onnx()
            .model_for_path(path)?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(
                    f32::datum_type(),
                    tvec!(1, INPUT_HEIGHT as usize, INPUT_WIDTH as usize, 3),
                ),
            )?
            .into_optimized()?
            .into_runnable()?;
        Ok(OnnxClassifier { plan })
    }
}

impl Classifier for OnnxClassifier {
    fn class_scores(&self, pixels: &[f32]) -> Result<Vec<f32>, PipelineError> {
        if pixels.len() != INPUT_PIXELS {
            return Err(PipelineError::Prediction(format!(
                "input length {} does not match expected {}",
                pixels.len(),
                INPUT_PIXELS
            )));
        }

        let input = tract_ndarray::Array4::from_shape_vec(
            (1, INPUT_HEIGHT as usize, INPUT_WIDTH as usize, 3),
            pixels.to_vec(),
        )
        .map_err(|e| PipelineError::Prediction(e.to_string()))?;

        let outputs = self
            .plan
            .run(tvec!(Tensor::from(input).into_tvalue()))
            .map_err(|e| PipelineError::Prediction(e.to_string()))?;

        let scores = outputs[0]
            .to_array_view::<f32>()
            .map_err(|e| PipelineError::Prediction(e.to_string()))?
            .iter()
            .copied()
            .collect();
        Ok(scores)
    }
}
