//! Dashboard routes.

use askama::Template;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::Result;
use crate::state::AppState;

/// Dashboard page template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub stats: Stats,
}

/// Dashboard statistics.
#[derive(Clone, Serialize)]
pub struct Stats {
    pub user_count: i64,
    pub blocked_user_count: i64,
    pub file_count: i64,
    pub active_file_count: i64,
    pub total_views: i64,
    pub delivery_count: i64,
    pub pending_deletion_count: i64,
    pub delete_timeout_seconds: u64,
}

/// Render the dashboard page.
pub async fn dashboard_page(State(state): State<AppState>) -> Result<DashboardTemplate> {
    let stats = get_stats(&state).await?;
    Ok(DashboardTemplate { stats })
}

/// Get dashboard statistics as JSON.
pub async fn stats_api(State(state): State<AppState>) -> Result<Json<Stats>> {
    let stats = get_stats(&state).await?;
    Ok(Json(stats))
}

/// Fetch statistics from the database.
async fn get_stats(state: &AppState) -> Result<Stats> {
    let pool = state.db.pool();

    Ok(Stats {
        user_count: database::user::count_users(pool).await?,
        blocked_user_count: database::user::count_blocked_users(pool).await?,
        file_count: database::file::count_files(pool).await?,
        active_file_count: database::file::count_active_files(pool).await?,
        total_views: database::file::total_views(pool).await?,
        delivery_count: database::delivery::count_deliveries(pool).await?,
        pending_deletion_count: database::delivery::count_undeleted(pool).await?,
        delete_timeout_seconds: database::setting::delete_timeout(pool).await?.as_secs(),
    })
}
