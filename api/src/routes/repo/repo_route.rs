use std::sync::Arc;

use axum::{
    extract::{Json, State},
    response::Response,
};
use repo_intake::{FetchedFile, IntakeError, RepoRef, parse_repo_ref};
use tracing::instrument;

use crate::{
    app::{app_state::AppState, http::response_envelope::ok},
    error_handler::AppResult,
    routes::{
        file_view::views,
        repo::repo_request::{RepoFileRequest, RepoFilesRequest},
    },
};

fn repo_ref(url: &str) -> Result<RepoRef, IntakeError> {
    parse_repo_ref(url).ok_or_else(|| IntakeError::InvalidRepoUrl(url.trim().to_string()))
}

#[instrument(name = "repo_files_route", skip_all, fields(url = %body.url))]
pub async fn repo_files_route(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RepoFilesRequest>,
) -> AppResult<Response> {
    let repo = repo_ref(&body.url)?;
    let files = state.ctx.github.list_files(&repo).await?;
    Ok(ok(views(&files)))
}

#[instrument(name = "repo_file_route", skip_all, fields(url = %body.url, path = %body.path))]
pub async fn repo_file_route(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RepoFileRequest>,
) -> AppResult<Response> {
    let repo = repo_ref(&body.url)?;
    let content = state.ctx.github.fetch_content(&repo, &body.path).await?;
    Ok(ok(FetchedFile {
        path: body.path,
        content,
    }))
}
