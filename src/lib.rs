pub mod classifier;
pub mod error;
pub mod interpret;
pub mod pipeline;
pub mod preprocess;
pub mod taxonomy;

// Convenience re-exports
pub use classifier::{Classifier, FixedClassifier, OnnxClassifier};
pub use error::PipelineError;
pub use interpret::{interpret, Prediction, Verdict, DEFAULT_THRESHOLD};
pub use pipeline::Pipeline;
pub use preprocess::Normalization;
pub use taxonomy::{WasteCategory, WasteClass};
