//! HTTP helpers for the appointments Lambda.

use lambda_http::{Body, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::MessageResponse;
use crate::{Error, Result};

/// Create a JSON response with the given status code and data.
pub fn json_response<T: Serialize>(
    status: u16,
    data: &T,
) -> std::result::Result<Response<Body>, lambda_http::Error> {
    let json = serde_json::to_string(data)?;
    Ok(with_cors(Response::builder().status(status))
        .header("Content-Type", "application/json")
        .body(Body::from(json))?)
}

/// Create a `{success: false, message}` response with the given status code.
pub fn error_response(
    status: u16,
    message: impl Into<String>,
) -> std::result::Result<Response<Body>, lambda_http::Error> {
    json_response(status, &MessageResponse::error(message))
}

/// Empty 204 answer to a CORS preflight.
pub fn preflight_response() -> std::result::Result<Response<Body>, lambda_http::Error> {
    Ok(with_cors(Response::builder().status(204)).body(Body::Empty)?)
}

fn with_cors(builder: lambda_http::http::response::Builder) -> lambda_http::http::response::Builder {
    builder
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "GET, POST, PATCH, DELETE, OPTIONS")
        .header("Access-Control-Allow-Headers", "Authorization, Content-Type")
}

/// Parse request body as JSON.
///
/// Malformed or mistyped bodies become `Error::Validation` so they map to a 400.
pub fn parse_json_body<T: DeserializeOwned>(body: &Body) -> Result<T> {
    let bytes: &[u8] = body.as_ref();
    let bytes = if bytes.is_empty() { b"{}".as_slice() } else { bytes };
    serde_json::from_slice(bytes).map_err(|e| Error::Validation(format!("Invalid request body: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppointmentIdRequest;

    #[test]
    fn test_json_response_headers() {
        let response = error_response(404, "Not found").unwrap();
        assert_eq!(response.status(), 404);
        assert_eq!(response.headers()["Content-Type"], "application/json");
        assert_eq!(response.headers()["Access-Control-Allow-Origin"], "*");

        let body: serde_json::Value = serde_json::from_slice(response.body().as_ref()).unwrap();
        assert_eq!(body, serde_json::json!({"success": false, "message": "Not found"}));
    }

    #[test]
    fn test_preflight_is_empty() {
        let response = preflight_response().unwrap();
        assert_eq!(response.status(), 204);
        let bytes: &[u8] = response.body().as_ref();
        assert!(bytes.is_empty());
        assert!(response.headers().contains_key("Access-Control-Allow-Headers"));
    }

    #[test]
    fn test_parse_rejects_wrong_types() {
        let body = Body::from(r#"{"appointment_id": 42}"#);
        let err = parse_json_body::<AppointmentIdRequest>(&body).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_parse_empty_body_reports_missing_field() {
        let err = parse_json_body::<AppointmentIdRequest>(&Body::Empty).unwrap_err();
        assert!(err.to_string().contains("appointment_id"));
    }
}
