use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use code_reviewer::{ReviewError, WorkflowError};
use repo_intake::IntakeError;
use thiserror::Error;
use tracing::error;

use crate::app::{app_state::ConfigError, http::response_envelope::ApiResponse};

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] ConfigError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// Rich HTTP error mapped from lower layers with specific status & code.
    #[error("{message}")]
    Http {
        status: StatusCode,
        code: &'static str,
        message: String,
    },
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR, // startup-only
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Http { status, .. } => *status,
            AppError::Bind(_) | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Http { code, .. } => code,
        }
    }

    fn http(status: StatusCode, code: &'static str, message: impl ToString) -> Self {
        AppError::Http {
            status,
            code,
            message: message.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(%status, code = self.error_code(), error = %self, "request failed");
        }
        ApiResponse::<()>::error(self.error_code(), self.to_string(), Vec::new())
            .into_response_with_status(status)
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

impl From<IntakeError> for AppError {
    fn from(err: IntakeError) -> Self {
        use StatusCode as S;
        let (status, code) = match &err {
            IntakeError::InvalidRepoUrl(_) => (S::BAD_REQUEST, "INVALID_REPO_URL"),
            IntakeError::UnsupportedPlatform(_) => (S::NOT_IMPLEMENTED, "UNSUPPORTED_PLATFORM"),
            IntakeError::AccessDenied { .. } => (S::FORBIDDEN, "ACCESS_DENIED"),
            IntakeError::NotLocal { .. } => (S::BAD_REQUEST, "NOT_LOCAL"),
            IntakeError::LocalReadFailed { .. } => (S::INTERNAL_SERVER_ERROR, "LOCAL_READ_FAILED"),
            IntakeError::RemoteFetchFailed { .. } => (S::BAD_GATEWAY, "REMOTE_FETCH_FAILED"),
            IntakeError::Network(_) => (S::BAD_GATEWAY, "NETWORK_ERROR"),
            IntakeError::DecodeFailed { .. } => (S::UNPROCESSABLE_ENTITY, "DECODE_FAILED"),
            IntakeError::Join(_) => (S::INTERNAL_SERVER_ERROR, "TASK_FAILED"),
        };
        AppError::http(status, code, err)
    }
}

impl From<ReviewError> for AppError {
    fn from(err: ReviewError) -> Self {
        use StatusCode as S;
        let (status, code) = match &err {
            ReviewError::EmptyInput => (S::BAD_REQUEST, "EMPTY_INPUT"),
            ReviewError::ModeNotSupportedForRepository(_) => (S::BAD_REQUEST, "MODE_NOT_SUPPORTED"),
            ReviewError::UnknownMode(_) => (S::BAD_REQUEST, "UNKNOWN_MODE"),
            ReviewError::Generation(_) => (S::BAD_GATEWAY, "GENERATION_FAILED"),
        };
        AppError::http(status, code, err)
    }
}

impl From<WorkflowError> for AppError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::Intake(e) => e.into(),
            WorkflowError::Review(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intake_errors_map_to_statuses() {
        let cases = [
            (IntakeError::InvalidRepoUrl("x".into()), 400),
            (IntakeError::UnsupportedPlatform("x".into()), 501),
            (
                IntakeError::AccessDenied {
                    path: "p".into(),
                    reason: "r".into(),
                },
                403,
            ),
            (
                IntakeError::RemoteFetchFailed {
                    status: 404,
                    repo: "a/b".into(),
                    url: "u".into(),
                    snippet: "s".into(),
                },
                502,
            ),
            (
                IntakeError::DecodeFailed {
                    path: "p".into(),
                    reason: "r".into(),
                },
                422,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).status_code().as_u16(), status);
        }
    }

    #[test]
    fn review_errors_map_to_codes() {
        let err = AppError::from(WorkflowError::Review(ReviewError::EmptyInput));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "EMPTY_INPUT");
        assert_eq!(err.to_string(), "cannot review empty code");
    }
}
