// API response utility functions module

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

use super::types::ErrorResponse;
use crate::logger;
use crate::store::StoreError;

/// Build a JSON response with the given status.
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let json = match serde_json::to_string_pretty(body) {
        Ok(j) => j,
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            return Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .header("Content-Type", "application/json")
                .body(Full::new(Bytes::from(
                    r#"{"error":"Internal server error"}"#,
                )))
                .unwrap_or_else(|_| Response::new(Full::new(Bytes::from("Error"))));
        }
    };

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to build response: {e}"));
            Response::new(Full::new(Bytes::from("Error")))
        })
}

/// 400 validation error: `{ success: false, error }`.
pub fn bad_request(message: &str) -> Response<Full<Bytes>> {
    json_response(
        StatusCode::BAD_REQUEST,
        &ErrorResponse {
            success: false,
            error: message.to_string(),
        },
    )
}

/// 404 for a missing todo id.
pub fn todo_not_found() -> Response<Full<Bytes>> {
    json_response(
        StatusCode::NOT_FOUND,
        &ErrorResponse {
            success: false,
            error: "Todo not found".to_string(),
        },
    )
}

/// 404 for an unmatched route.
pub fn route_not_found() -> Response<Full<Bytes>> {
    json_response(
        StatusCode::NOT_FOUND,
        &serde_json::json!({ "error": "Route not found" }),
    )
}

/// 413 Payload Too Large (body exceeded `http.max_body_size`).
pub fn payload_too_large() -> Response<Full<Bytes>> {
    json_response(
        StatusCode::PAYLOAD_TOO_LARGE,
        &serde_json::json!({ "error": "Payload too large" }),
    )
}

/// Centralized mapping from store error kinds to HTTP responses.
///
/// `NotFound` is a domain outcome (404); everything else is a persistence
/// failure, logged and answered as `{ "error": <message> }` with 500.
pub fn store_error_response(err: &StoreError) -> Response<Full<Bytes>> {
    match err {
        StoreError::NotFound => todo_not_found(),
        StoreError::Io(_) | StoreError::Serialization(_) => {
            logger::log_error(&format!("Store operation failed: {err}"));
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &serde_json::json!({ "error": err.to_string() }),
            )
        }
    }
}
