//! HTTP surface for the review flows.

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tokio::signal;
use tracing::{error, info};

pub mod app;
pub mod error_handler;
pub mod middleware_layer;
pub mod routes;

use crate::{
    app::app_state::AppState,
    error_handler::AppError,
    middleware_layer::json_extractor::json_error_mapper,
    routes::{
        history::history_route::{
            clear_history_route, export_history_route, get_history_route, list_history_route,
        },
        local::local_route::{local_file_route, local_scan_route},
        meta::meta_route::{health_route, languages_route, modes_route},
        repo::repo_route::{repo_file_route, repo_files_route},
        review::review_route::{review_file_route, review_repo_route, revise_route},
    },
};

/// All routes, with extractor rejections rewritten into the JSON envelope.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_route))
        .route("/languages", get(languages_route))
        .route("/modes", get(modes_route))
        .route("/local/scan", post(local_scan_route))
        .route("/local/file", post(local_file_route))
        .route("/repo/files", post(repo_files_route))
        .route("/repo/file", post(repo_file_route))
        .route("/review/file", post(review_file_route))
        .route("/review/repo", post(review_repo_route))
        .route("/review/revise", post(revise_route))
        .route("/history", get(list_history_route).delete(clear_history_route))
        .route("/history/{id}", get(get_history_route))
        .route("/history/{id}/export", get(export_history_route))
        .layer(middleware::from_fn(json_error_mapper))
        .with_state(state)
}

/// Builds state from the environment and serves until Ctrl+C.
pub async fn start() -> Result<(), AppError> {
    let state = Arc::new(AppState::from_env()?);
    let address = state.config.api_address;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(AppError::Bind)?;
    info!(%address, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("server stopped");
    Ok(())
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
