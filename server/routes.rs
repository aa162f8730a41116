use std::io::Cursor;
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::handlers;
use crate::state::SharedState;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

pub fn json_response(status: u16, body: String) -> Response<Cursor<Vec<u8>>> {
    let bytes = body.into_bytes();
    let len = bytes.len();
    Response::new(
        StatusCode(status),
        vec![Header::from_bytes(b"Content-Type", b"application/json").unwrap()],
        Cursor::new(bytes),
        Some(len),
        None,
    )
}

pub fn error_response(status: u16, message: &str) -> Response<Cursor<Vec<u8>>> {
    let body = serde_json::json!({ "success": false, "error": message });
    json_response(status, body.to_string())
}

pub fn not_found() -> Response<Cursor<Vec<u8>>> {
    error_response(404, "Not found")
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Dispatches incoming requests to the appropriate handler.
///
/// Handlers receive a `&mut Request` so that the dispatcher retains
/// ownership and can call `request.respond(response)` at the end.
pub fn dispatch(mut request: Request, state: SharedState) {
    let method = request.method().clone();
    let url = request.url().to_owned();

    let path = match url.find('?') {
        Some(pos) => url[..pos].to_owned(),
        None => url,
    };

    let response = match (method, path.as_str()) {
        (Method::Get, "/health") => handlers::health::handle(state),
        (Method::Post, "/predict") => handlers::predict::handle_upload(&mut request, state),
        (Method::Post, "/predict_base64") => handlers::predict::handle_base64(&mut request, state),
        _ => not_found(),
    };

    let _ = request.respond(response);
}
