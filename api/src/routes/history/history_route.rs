use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use code_reviewer::{export_file_name, render_markdown};
use review_history::HistoryItem;

use crate::{
    app::{app_state::AppState, http::response_envelope::ok},
    error_handler::{AppError, AppResult},
};

/// Newest first, at most 50 entries.
pub async fn list_history_route(State(state): State<Arc<AppState>>) -> Response {
    ok(state.ctx.history.load().await)
}

async fn find(state: &AppState, id: &str) -> AppResult<HistoryItem> {
    state
        .ctx
        .history
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("history item {id}")))
}

pub async fn get_history_route(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    Ok(ok(find(&state, &id).await?))
}

/// The review as a markdown attachment named after the reviewed file.
pub async fn export_history_route(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let item = find(&state, &id).await?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        header_safe(&export_file_name(&item.file_name))
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/markdown; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        render_markdown(&item),
    )
        .into_response())
}

/// Replaces characters that cannot appear in a quoted header parameter.
fn header_safe(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_control() || c == '"' || c == '\\' { '_' } else { c })
        .collect()
}

/// Empties the history and returns the (now empty) list.
pub async fn clear_history_route(State(state): State<Arc<AppState>>) -> Response {
    state.ctx.history.clear().await;
    ok(Vec::<HistoryItem>::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_safe_replaces_quotes_and_control_characters() {
        assert_eq!(header_safe("a\"b\\c.md"), "a_b_c.md");
        assert_eq!(header_safe("x\ny\r\u{7}\u{7f}.md"), "x_y___.md");
        assert_eq!(header_safe("café.md"), "café.md");
    }
}
