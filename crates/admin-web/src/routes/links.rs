//! Link (registered file) routes.

use askama::Template;
use axum::extract::State;
use axum::Json;
use database::{FileRecord, FileSummary};
use serde::Deserialize;
use tracing::info;

use crate::error::{AdminError, Result};
use crate::extract::{JsonBody, PathParam, QueryParams};
use crate::state::AppState;

/// Links page template.
#[derive(Template)]
#[template(path = "links.html")]
pub struct LinksTemplate {
    pub files: Vec<FileSummary>,
}

/// Listing query parameters.
#[derive(Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}

/// Request to enable or disable a link.
#[derive(Deserialize)]
pub struct ActiveRequest {
    pub active: bool,
}

/// Render the links page.
pub async fn links_page(State(state): State<AppState>) -> Result<LinksTemplate> {
    let files = database::file::list_recent_files(state.db.pool(), state.links_page_size).await?;
    Ok(LinksTemplate { files })
}

/// Recent links as JSON.
pub async fn list_api(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListQuery>,
) -> Result<Json<Vec<FileSummary>>> {
    let limit = query.limit.unwrap_or(state.links_page_size);
    if limit <= 0 {
        return Err(AdminError::BadRequest("limit must be positive".to_string()));
    }

    let files = database::file::list_recent_files(state.db.pool(), limit).await?;
    Ok(Json(files))
}

/// Full record for a token, whether active or not.
pub async fn by_token_api(
    State(state): State<AppState>,
    PathParam(token): PathParam<String>,
) -> Result<Json<FileRecord>> {
    let file = database::file::get_file_by_token(state.db.pool(), &token).await?;
    Ok(Json(file))
}

/// Enable or disable a link.
pub async fn set_active_api(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
    JsonBody(req): JsonBody<ActiveRequest>,
) -> Result<Json<FileRecord>> {
    let file = database::file::set_active(state.db.pool(), id, req.active).await?;
    info!(id, active = req.active, "Link toggled from admin");
    Ok(Json(file))
}
