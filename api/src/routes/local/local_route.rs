use std::sync::Arc;

use axum::{
    extract::{Json, State},
    response::Response,
};
use repo_intake::{
    CodeFile, FetchedFile, FileContent, FileOrigin, classify,
    local::{read_content, scan},
};
use tracing::{info, instrument};

use crate::{
    app::{app_state::AppState, http::response_envelope::ok},
    error_handler::{AppError, AppResult},
    routes::{
        file_view::views,
        local::local_request::{LocalFileRequest, ScanRequest},
    },
};

#[instrument(name = "local_scan_route", skip_all, fields(directory = ?body.directory))]
pub async fn local_scan_route(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ScanRequest>,
) -> AppResult<Response> {
    let picker = state.workspace.picker(body.directory.as_deref());
    let files = scan(&picker, &state.config.scan).await?;
    info!(files = files.len(), "local scan served");
    Ok(ok(views(&files)))
}

/// Reads one file below a granted directory.
#[instrument(name = "local_file_route", skip_all, fields(directory = %body.directory, path = %body.path))]
pub async fn local_file_route(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LocalFileRequest>,
) -> AppResult<Response> {
    let dir = state.workspace.open(&body.directory).await?;
    let handle = dir.resolve(&body.path).await?;
    let language = classify(&body.path)
        .ok_or_else(|| AppError::BadRequest(format!("unsupported file type: {}", body.path)))?;

    let file = CodeFile {
        path: body.path,
        language,
        content: FileContent::Unloaded,
        origin: FileOrigin::Local(handle),
    };
    let content = read_content(&file).await?;

    Ok(ok(FetchedFile {
        path: file.path,
        content,
    }))
}
