use std::io::Cursor;

use serde::Serialize;
use tiny_http::Response;

use ecosort::taxonomy::CLASS_NAMES;

use crate::state::SharedState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    model_loaded: bool,
    supported_classes: [&'static str; 6],
}

/// `GET /health`
///
/// Answers 200 even when no model is loaded, so that callers can tell
/// "service down" apart from "service degraded".
pub fn handle(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    crate::routes::json_response(200, build_body(state.model_loaded()))
}

fn build_body(model_loaded: bool) -> String {
    let body = HealthResponse {
        status: "healthy",
        model_loaded,
        supported_classes: CLASS_NAMES,
    };
    serde_json::to_string(&body).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_degraded_mode_without_failing() {
        let body = build_body(false);
        assert!(body.contains("\"model_loaded\":false"));
        assert!(body.contains("\"status\":\"healthy\""));
        assert!(body.contains("cardboard"));
        assert!(body.contains("trash"));
    }

    #[test]
    fn reports_loaded_model() {
        assert!(build_body(true).contains("\"model_loaded\":true"));
    }
}
