use std::collections::BTreeMap;
use std::io::{Cursor, Read};

use serde::{Deserialize, Serialize};
use tiny_http::{Request, Response};
use tracing::warn;

use ecosort::interpret::round2;
use ecosort::taxonomy::CLASS_NAMES;
use ecosort::{PipelineError, Prediction};

use crate::routes::{error_response, json_response};
use crate::state::SharedState;
use crate::util::multipart::{extract_boundary, extract_file_field};

const MAX_BODY_BYTES: usize = 10 * 1024 * 1024; // 10 MB

// ---------------------------------------------------------------------------
// Response records
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct PredictionBody {
    model_class: &'static str,
    app_waste_type: &'static str,
    /// Percentage in [0, 100], rounded to two decimal places.
    confidence: f32,
    points: u32,
}

#[derive(Serialize)]
struct ModelInfo {
    input_size: &'static str,
    classes: [&'static str; 6],
    preprocessing: &'static str,
}

#[derive(Serialize)]
struct PredictResponse {
    success: bool,
    prediction: PredictionBody,
    all_predictions: BTreeMap<&'static str, f32>,
    model_info: ModelInfo,
}

fn build_success_body(prediction: &Prediction) -> String {
    let body = PredictResponse {
        success: true,
        prediction: PredictionBody {
            model_class: prediction.class.name(),
            app_waste_type: prediction.category.name(),
            confidence: round2(prediction.confidence * 100.0),
            points: prediction.points,
        },
        all_predictions: prediction
            .scores
            .iter()
            .map(|(class, score)| (class.name(), round2(score * 100.0)))
            .collect(),
        model_info: ModelInfo {
            input_size: "224x224",
            classes: CLASS_NAMES,
            preprocessing: "RGB normalization",
        },
    };
    serde_json::to_string(&body).unwrap_or_default()
}

fn status_for(err: &PipelineError) -> u16 {
    if err.is_client_error() {
        400
    } else {
        500
    }
}

fn failure_response(err: PipelineError) -> Response<Cursor<Vec<u8>>> {
    error_response(status_for(&err), &err.to_string())
}

// ---------------------------------------------------------------------------
// POST /predict  (multipart, file field `file`)
// ---------------------------------------------------------------------------

pub fn handle_upload(request: &mut Request, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let pipeline = match state.pipeline() {
        Some(p) => p,
        None => return failure_response(PipelineError::ModelUnavailable),
    };

    let content_type = request
        .headers()
        .iter()
        .find(|h| h.field.equiv("Content-Type"))
        .map(|h| h.value.as_str().to_owned())
        .unwrap_or_default();

    if !content_type.starts_with("multipart/form-data") {
        return error_response(400, "Expected multipart/form-data");
    }
    let boundary = match extract_boundary(&content_type) {
        Some(b) => b,
        None => return error_response(400, "Invalid multipart request"),
    };

    let mut body: Vec<u8> = Vec::new();
    let _ = request.as_reader().read_to_end(&mut body);
    if body.len() > MAX_BODY_BYTES {
        return error_response(413, "Request body exceeds 10 MB limit");
    }

    let file_bytes = match extract_file_field(&body, &boundary, "file") {
        Some(bytes) if !bytes.is_empty() => bytes,
        _ => return error_response(400, "No file provided"),
    };

    match pipeline.predict_image_bytes(&file_bytes) {
        Ok(prediction) => json_response(200, build_success_body(&prediction)),
        Err(e) => {
            warn!(error = %e, "prediction failed");
            failure_response(e)
        }
    }
}

// ---------------------------------------------------------------------------
// POST /predict_base64  (JSON body {"image": "..."})
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct Base64Request {
    image: String,
}

pub fn handle_base64(request: &mut Request, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let pipeline = match state.pipeline() {
        Some(p) => p,
        None => return failure_response(PipelineError::ModelUnavailable),
    };

    let mut body = String::new();
    let _ = request.as_reader().read_to_string(&mut body);
    if body.len() > MAX_BODY_BYTES {
        return error_response(413, "Request body exceeds 10 MB limit");
    }

    let payload: Base64Request = match serde_json::from_str(&body) {
        Ok(p) => p,
        Err(_) => return error_response(400, "No image data provided"),
    };

    match pipeline.predict_base64(&payload.image) {
        Ok(prediction) => json_response(200, build_success_body(&prediction)),
        Err(e) => {
            warn!(error = %e, "prediction failed");
            failure_response(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecosort::interpret::interpret;

    #[test]
    fn success_body_carries_remapped_category_and_points() {
        let prediction = interpret(&[0.01, 0.02, 0.03, 0.04, 0.05, 0.85]).unwrap();
        let body = build_success_body(&prediction);
        assert!(body.contains("\"success\":true"));
        assert!(body.contains("\"model_class\":\"trash\""));
        assert!(body.contains("\"app_waste_type\":\"general\""));
        assert!(body.contains("\"points\":5"));
        assert!(body.contains("\"confidence\":85.0"));
    }

    #[test]
    fn success_body_lists_all_class_percentages() {
        let prediction = interpret(&[0.31, 0.13, 0.09, 0.22, 0.17, 0.08]).unwrap();
        let body: serde_json::Value =
            serde_json::from_str(&build_success_body(&prediction)).unwrap();
        let all = body["all_predictions"].as_object().unwrap();
        assert_eq!(all.len(), 6);
        let total: f64 = all.values().map(|v| v.as_f64().unwrap()).sum();
        assert!((total - 100.0).abs() < 0.1, "total was {}", total);
    }

    #[test]
    fn client_errors_map_to_400_and_server_errors_to_500() {
        let decode = image::load_from_memory(b"junk").unwrap_err();
        assert_eq!(status_for(&PipelineError::Decode(decode)), 400);
        assert_eq!(status_for(&PipelineError::ModelUnavailable), 500);
        assert_eq!(
            status_for(&PipelineError::Prediction("boom".to_owned())),
            500
        );
    }
}
