use std::sync::Arc;

use axum::{
    extract::{Json, State},
    response::Response,
};
use code_reviewer::FileReviewRequest;
use repo_intake::find_by_value;
use tracing::{debug, instrument};

use crate::{
    app::{app_state::AppState, http::response_envelope::ok},
    error_handler::AppResult,
    routes::review::review_request::{
        ReviewFileRequest, ReviewRepoRequest, ReviseRequest, parse_mode,
    },
};

#[instrument(
    name = "review_file_route",
    skip_all,
    fields(language = %body.language, file = ?body.file_name)
)]
pub async fn review_file_route(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ReviewFileRequest>,
) -> AppResult<Response> {
    let mode = parse_mode(body.mode.as_deref())?;
    let req = FileReviewRequest {
        code: body.code,
        language: body.language,
        file_name: body.file_name,
        custom_instructions: body.custom_instructions,
        mode,
    };
    let outcome = state.ctx.review_file(&req).await?;
    debug!(recorded = outcome.history_item.is_some(), "file review served");
    Ok(ok(outcome))
}

#[instrument(name = "review_repo_route", skip_all, fields(url = %body.url))]
pub async fn review_repo_route(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ReviewRepoRequest>,
) -> AppResult<Response> {
    let mode = parse_mode(body.mode.as_deref())?;
    let outcome = state
        .ctx
        .review_repository(&body.url, &body.custom_instructions, mode)
        .await?;
    Ok(ok(outcome))
}

#[instrument(name = "revise_route", skip_all, fields(language = %body.language))]
pub async fn revise_route(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ReviseRequest>,
) -> AppResult<Response> {
    let label = find_by_value(&body.language)
        .map(|l| l.label)
        .unwrap_or(body.language.as_str());
    let revision = state
        .ctx
        .revise_with_diff(&body.code, label, &body.feedback)
        .await?;
    Ok(ok(revision))
}
