use axum::{
    body::{Body, Bytes},
    http::{HeaderValue, Request, StatusCode, header},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::debug;

use crate::app::http::response_envelope::{ApiErrorDetail, ApiResponse};

/// Request body fields, most specific first.
const KNOWN_FIELDS: &[&str] = &[
    "custom_instructions",
    "file_name",
    "directory",
    "feedback",
    "language",
    "mode",
    "path",
    "code",
    "url",
];

async fn take_body(res: Response) -> (axum::http::response::Parts, Bytes) {
    let (parts, body) = res.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();
    (parts, bytes)
}

fn guess_path_from_serde_msg(msg: &str) -> Option<String> {
    KNOWN_FIELDS
        .iter()
        .find(|key| msg.contains(&format!("`{key}`")) || msg.contains(*key))
        .map(|key| key.to_string())
}

fn ensure_request_id(parts: &mut axum::http::response::Parts) -> String {
    if let Some(v) = parts
        .headers
        .get("X-Request-Id")
        .and_then(|h| h.to_str().ok())
        .filter(|v| !v.trim().is_empty())
    {
        return v.to_string();
    }
    let nanos = Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| Utc::now().timestamp_micros() * 1000);
    let id = format!("req-{nanos}");
    if let Ok(value) = HeaderValue::from_str(&id) {
        parts.headers.insert("X-Request-Id", value);
    }
    id
}

fn is_json(parts: &axum::http::response::Parts) -> bool {
    parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"))
}

/// Rewrites axum's plain-text extractor rejections (400/415/422) into the
/// JSON error envelope. Responses that are already JSON pass through.
pub async fn json_error_mapper(req: Request<Body>, next: Next) -> Response {
    let res = next.run(req).await;
    let status = res.status();

    let code = match status {
        StatusCode::BAD_REQUEST => "BAD_REQUEST",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "UNSUPPORTED_MEDIA_TYPE",
        StatusCode::UNPROCESSABLE_ENTITY => "UNPROCESSABLE_ENTITY",
        _ => return res,
    };

    let (mut parts, bytes) = take_body(res).await;
    if is_json(&parts) {
        return Response::from_parts(parts, Body::from(bytes));
    }

    let original = String::from_utf8_lossy(&bytes);
    let req_id = ensure_request_id(&mut parts);
    debug!(%req_id, %status, body = %original, "mapping extractor rejection");

    let detail = ApiErrorDetail {
        path: guess_path_from_serde_msg(&original),
        hint: if original.contains("missing field") {
            Some("Add the missing field to the JSON body.".into())
        } else if original.contains("expected a map") || original.contains("expected struct") {
            Some("Expected a JSON object here (e.g. { \"field\": \"value\" }).".into())
        } else if status == StatusCode::UNSUPPORTED_MEDIA_TYPE {
            Some("Send the body with `Content-Type: application/json`.".into())
        } else {
            None
        },
    };

    let envelope = ApiResponse::<()>::error(code, original.trim(), vec![detail]);
    let body = match serde_json::to_vec(&envelope) {
        Ok(v) => v,
        Err(_) => bytes.to_vec(),
    };

    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    parts.headers.remove(header::CONTENT_LENGTH);

    Response::from_parts(parts, Body::from(body))
}
