/// ecosort prediction service
///
/// A thin JSON API over the waste-image classification pipeline, served by a
/// synchronous tiny_http server.
///
/// Run with:
///   cargo run --bin server --release
///
/// Endpoints:
///   GET  /health          — service + model status
///   POST /predict         — multipart image upload (field `file`)
///   POST /predict_base64  — JSON body {"image": "<data-uri-or-base64>"}
mod handlers;
mod routes;
mod state;
mod util;

use std::sync::Arc;
use tiny_http::Server;
use tracing::{info, warn};

use ecosort::{Normalization, OnnxClassifier, Pipeline};

use state::AppState;

const DEFAULT_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_MODEL_PATH: &str = "model/waste_classifier.onnx";

fn main() {
    tracing_subscriber::fmt::init();

    let addr = std::env::var("ECOSORT_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_owned());
    let model_path =
        std::env::var("ECOSORT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_owned());
    let normalization = match std::env::var("ECOSORT_PREPROCESSING").as_deref() {
        Ok("mobilenet") => Normalization::MobileNet,
        _ => Normalization::ZeroToOne,
    };

    // A failed load leaves the service in degraded mode: health checks still
    // answer, prediction requests fail with a structured 500.
    let pipeline = match OnnxClassifier::load(&model_path) {
        Ok(classifier) => {
            info!(model = %model_path, "model loaded");
            Some(Pipeline::new(Box::new(classifier), normalization))
        }
        Err(e) => {
            warn!(model = %model_path, error = %e, "model load failed; serving without a model");
            None
        }
    };

    let state = Arc::new(AppState::new(pipeline));

    let server = Server::http(&addr).expect("Failed to bind HTTP server");
    info!(%addr, model_loaded = state.model_loaded(), "ecosort prediction service listening");

    // Each request is dispatched on its own thread. The state is read-only
    // after startup, so requests share it without locking.
    for request in server.incoming_requests() {
        let state = state.clone();
        std::thread::spawn(move || {
            routes::dispatch(request, state);
        });
    }
}
