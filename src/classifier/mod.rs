pub mod fixed;
pub mod onnx;

pub use fixed::FixedClassifier;
pub use onnx::OnnxClassifier;

use crate::error::PipelineError;

/// A loaded model, treated as an opaque scoring function.
///
/// Implementations take a normalized flat RGB input (see
/// [`crate::preprocess::image_bytes_to_rgb_input`]) and run one synchronous
/// forward pass, returning the six-way probability vector index-aligned with
/// [`crate::taxonomy::WasteClass::ALL`]. Implementations must be shareable
/// read-only across request threads.
pub trait Classifier: Send + Sync {
    fn class_scores(&self, pixels: &[f32]) -> Result<Vec<f32>, PipelineError>;
}
