//! Health check endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
}

/// Health check endpoint. Fails with 503 when the database is unreachable.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Health>) {
    match ping_database(&state).await {
        Ok(()) => (StatusCode::OK, Json(Health { status: "ok" })),
        Err(err) => {
            tracing::warn!(error = %err, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(Health {
                    status: "unavailable",
                }),
            )
        }
    }
}

async fn ping_database(state: &AppState) -> database::Result<()> {
    database::setting::list_settings(state.db.pool()).await?;
    Ok(())
}
