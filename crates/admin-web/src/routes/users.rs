//! User moderation routes.

use axum::extract::State;
use axum::Json;
use database::User;
use serde::Deserialize;

use crate::error::{AdminError, Result};
use crate::extract::{JsonBody, PathParam, QueryParams};
use crate::state::AppState;

const DEFAULT_USER_LIMIT: i64 = 100;

#[derive(Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}

#[derive(Deserialize)]
pub struct BlockRequest {
    pub blocked: bool,
}

/// Recently seen users.
pub async fn list_api(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListQuery>,
) -> Result<Json<Vec<User>>> {
    let limit = query.limit.unwrap_or(DEFAULT_USER_LIMIT);
    if limit <= 0 {
        return Err(AdminError::BadRequest("limit must be positive".to_string()));
    }

    let users = database::user::list_users(state.db.pool(), limit).await?;
    Ok(Json(users))
}

/// Block or unblock a user.
pub async fn set_blocked_api(
    State(state): State<AppState>,
    PathParam(user_id): PathParam<i64>,
    JsonBody(req): JsonBody<BlockRequest>,
) -> Result<Json<User>> {
    let pool = state.db.pool();
    database::user::set_blocked(pool, user_id, req.blocked).await?;
    Ok(Json(database::user::get_user(pool, user_id).await?))
}
