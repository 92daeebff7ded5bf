//! Route handlers for the admin web interface.

pub mod dashboard;
pub mod health;
pub mod links;
pub mod settings;
pub mod users;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // HTML pages
        .route("/", get(dashboard::dashboard_page))
        .route("/links", get(links::links_page))
        // Health check
        .route("/health", get(health::health))
        // API endpoints
        .route("/api/stats", get(dashboard::stats_api))
        .route("/api/files", get(links::list_api))
        .route("/api/files/by-token/:token", get(links::by_token_api))
        .route("/api/files/:id/active", post(links::set_active_api))
        .route("/api/settings", get(settings::list_api))
        .route(
            "/api/settings/delete-timeout",
            get(settings::get_delete_timeout).put(settings::put_delete_timeout),
        )
        .route("/api/users", get(users::list_api))
        .route("/api/users/:id/blocked", post(users::set_blocked_api))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use database::{Database, NewFile, NewUser};
    use serde_json::Value;
    use tower::ServiceExt;

    async fn test_state() -> AppState {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.bootstrap().await.unwrap();
        AppState::new(db, 50)
    }

    async fn send(state: &AppState, req: Request<Body>) -> (StatusCode, Value) {
        let response = router().with_state(state.clone()).oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_req(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn seed_file(state: &AppState, token: &str) -> i64 {
        database::file::insert_file(
            state.db.pool(),
            &NewFile {
                storage_chat_id: -100500,
                storage_message_id: 3,
                file_unique_id: "u".to_string(),
                file_type: "video".to_string(),
                file_size: Some(512),
                token: token.to_string(),
                required_channels: vec![-100600],
            },
        )
        .await
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn test_health() {
        let state = test_state().await;
        let (status, body) = send(&state, get_req("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_unknown_token_is_404() {
        let state = test_state().await;
        let (status, body) = send(&state, get_req("/api/files/by-token/missing")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("missing"));
    }

    #[tokio::test]
    async fn test_toggle_link() {
        let state = test_state().await;
        let id = seed_file(&state, "tok").await;

        let (status, body) = send(
            &state,
            json_req("POST", &format!("/api/files/{id}/active"), serde_json::json!({ "active": false })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["active"], false);
        assert_eq!(body["required_channels"][0], -100600);

        let (status, body) = send(&state, get_req("/api/files?limit=10")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["token"], "tok");
        assert_eq!(body[0]["active"], false);

        let (status, _) = send(
            &state,
            json_req("POST", "/api/files/999/active", serde_json::json!({ "active": true })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_rejects_non_positive_limit() {
        let state = test_state().await;
        let (status, _) = send(&state, get_req("/api/files?limit=0")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_timeout_setting() {
        let state = test_state().await;

        let (status, body) = send(&state, get_req("/api/settings/delete-timeout")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["seconds"], 20);

        let (status, _) = send(
            &state,
            json_req("PUT", "/api/settings/delete-timeout", serde_json::json!({ "seconds": 45 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&state, get_req("/api/settings")).await;
        assert_eq!(body[0]["key"], "delete_timeout_seconds");
        assert_eq!(body[0]["value"], "45");
    }

    #[tokio::test]
    async fn test_block_user() {
        let state = test_state().await;
        database::user::upsert_user(
            state.db.pool(),
            &NewUser {
                user_id: 7,
                username: Some("carol".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let (status, body) = send(
            &state,
            json_req("POST", "/api/users/7/blocked", serde_json::json!({ "blocked": true })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["blocked"], true);

        let (_, stats) = send(&state, get_req("/api/stats")).await;
        assert_eq!(stats["user_count"], 1);
        assert_eq!(stats["blocked_user_count"], 1);
        assert_eq!(stats["delete_timeout_seconds"], 20);

        let (status, _) = send(
            &state,
            json_req("POST", "/api/users/8/blocked", serde_json::json!({ "blocked": true })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_input_is_json_400() {
        let state = test_state().await;
        let id = seed_file(&state, "shape").await;

        let cases = [
            json_req("POST", &format!("/api/files/{id}/active"), serde_json::json!({ "active": "yes" })),
            json_req("PUT", "/api/settings/delete-timeout", serde_json::json!({ "seconds": -5 })),
            get_req("/api/files?limit=abc"),
            get_req("/api/users?limit=many"),
            json_req("POST", "/api/users/abc/blocked", serde_json::json!({ "blocked": true })),
            json_req("POST", "/api/files/xyz/active", serde_json::json!({ "active": true })),
            Request::builder()
                .method("POST")
                .uri(format!("/api/files/{id}/active"))
                .body(Body::from(r#"{"active":true}"#))
                .unwrap(),
        ];

        for req in cases {
            let uri = req.uri().to_string();
            let (status, body) = send(&state, req).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert!(body["error"].is_string(), "{uri}: {body}");
        }

        // nothing was changed by the rejected requests
        let file = database::file::get_file(state.db.pool(), id).await.unwrap();
        assert!(file.active);
        let timeout = database::setting::delete_timeout(state.db.pool()).await.unwrap();
        assert_eq!(timeout.as_secs(), 20);
    }

    #[tokio::test]
    async fn test_pages_render() {
        let state = test_state().await;
        seed_file(&state, "rendered-token").await;

        let response = router()
            .with_state(state.clone())
            .oneshot(get_req("/links"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("rendered-token"));

        let response = router()
            .with_state(state)
            .oneshot(get_req("/"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
