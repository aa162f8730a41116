use std::sync::Arc;

use ecosort::Pipeline;

/// Process-wide service state, immutable after startup.
pub struct AppState {
    /// The loaded inference pipeline, or `None` when the model failed to
    /// load and the service is running in degraded mode.
    pipeline: Option<Pipeline>,
}

impl AppState {
    pub fn new(pipeline: Option<Pipeline>) -> Self {
        AppState { pipeline }
    }

    pub fn pipeline(&self) -> Option<&Pipeline> {
        self.pipeline.as_ref()
    }

    pub fn model_loaded(&self) -> bool {
        self.pipeline.is_some()
    }
}

/// Shared state type — an `Arc<AppState>` passed to every handler.
pub type SharedState = Arc<AppState>;
