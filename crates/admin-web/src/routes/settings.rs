//! Settings routes.

use std::time::Duration;

use axum::extract::State;
use axum::Json;
use database::Setting;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::extract::JsonBody;
use crate::state::AppState;

/// Delete timer payload, used for both reads and writes.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteTimeout {
    pub seconds: u64,
}

/// All settings as JSON.
pub async fn list_api(State(state): State<AppState>) -> Result<Json<Vec<Setting>>> {
    let settings = database::setting::list_settings(state.db.pool()).await?;
    Ok(Json(settings))
}

/// Current delete timer.
pub async fn get_delete_timeout(State(state): State<AppState>) -> Result<Json<DeleteTimeout>> {
    let timeout = database::setting::delete_timeout(state.db.pool()).await?;
    Ok(Json(DeleteTimeout {
        seconds: timeout.as_secs(),
    }))
}

/// Replace the delete timer.
pub async fn put_delete_timeout(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<DeleteTimeout>,
) -> Result<Json<DeleteTimeout>> {
    database::setting::set_delete_timeout(state.db.pool(), Duration::from_secs(req.seconds))
        .await?;
    info!(seconds = req.seconds, "Delete timeout changed");
    Ok(Json(req))
}
