use std::sync::Arc;

use axum::{extract::State, response::Response};
use code_reviewer::ReviewMode;
use repo_intake::LANGUAGES;

use crate::{
    app::{app_state::AppState, http::response_envelope::ok},
    routes::meta::meta_response::{HealthResponse, ModeView},
};

pub async fn health_route(State(state): State<Arc<AppState>>) -> Response {
    ok(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        local_access: state.workspace.is_enabled(),
    })
}

/// Supported languages in detection order.
pub async fn languages_route() -> Response {
    ok(LANGUAGES)
}

pub async fn modes_route() -> Response {
    ok(ReviewMode::ALL.map(ModeView::from))
}
