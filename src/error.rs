use thiserror::Error;

/// Failure taxonomy for the prediction pipeline.
///
/// Every variant is converted into a structured failure response at the
/// service boundary; none of them abort the running process.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input bytes are not a decodable image (unrecognized format,
    /// truncated, or corrupt).
    #[error("image decode error: {0}")]
    Decode(#[from] image::ImageError),

    /// The base64 payload (after stripping any data-URI prefix) is malformed.
    #[error("invalid base64 image data: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),

    /// No model was loaded at startup; the service is in degraded mode.
    #[error("model not loaded")]
    ModelUnavailable,

    /// The forward pass itself failed.
    #[error("prediction error: {0}")]
    Prediction(String),
}

impl PipelineError {
    /// True when the failure was caused by the caller's input rather than
    /// server-side state; drives the 400-vs-500 split at the HTTP boundary.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PipelineError::Decode(_) | PipelineError::InvalidEncoding(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_errors_are_client_errors() {
        let err = PipelineError::from(image::load_from_memory(b"junk").unwrap_err());
        assert!(err.is_client_error());
    }

    #[test]
    fn model_and_prediction_errors_are_server_errors() {
        assert!(!PipelineError::ModelUnavailable.is_client_error());
        assert!(!PipelineError::Prediction("shape mismatch".to_owned()).is_client_error());
    }
}
