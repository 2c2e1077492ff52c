use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Envelope for every JSON answer: `{ success, data }` or `{ success: false, error }`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Stable, machine-readable error code (e.g. "EMPTY_INPUT").
    pub code: &'static str,
    /// One dismissible, human-readable message.
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ApiErrorDetail>,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorDetail {
    /// Request field the problem relates to, like `url` or `mode`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(
        code: &'static str,
        message: impl Into<String>,
        details: Vec<ApiErrorDetail>,
    ) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code,
                message: message.into(),
                details,
            }),
        }
    }

    pub fn into_response_with_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// `200 OK` with `data` wrapped in a success envelope.
pub fn ok<T: Serialize>(data: T) -> Response {
    ApiResponse::success(data).into_response_with_status(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn success_omits_error() {
        let v = serde_json::to_value(ApiResponse::success(vec![1, 2])).unwrap();
        assert_eq!(v, json!({"success": true, "data": [1, 2]}));
    }

    #[test]
    fn error_omits_data_and_empty_details() {
        let v = serde_json::to_value(ApiResponse::<()>::error("EMPTY_INPUT", "nope", Vec::new()))
            .unwrap();
        assert_eq!(
            v,
            json!({"success": false, "error": {"code": "EMPTY_INPUT", "message": "nope"}})
        );
    }
}
