//! Router smoke tests that need no live database.
//!
//! The pool is created lazily, so routes that never touch it (health,
//! auth rejections) can be exercised through the full middleware stack.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use mendlet_api::auth::jwt::JwtConfig;
use mendlet_api::config::ServerConfig;
use mendlet_api::router::build_app_router;
use mendlet_api::state::AppState;

fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 5,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

fn test_app() -> axum::Router {
    let config = test_config();
    let pool = sqlx::postgres::PgPoolOptions::new()
        .connect_lazy("postgres://localhost/mendlet_test")
        .expect("lazy pool creation should succeed");
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

#[tokio::test]
async fn health_check_reports_ok() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::OK);

    let body = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).expect("body should be JSON");
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn protected_routes_reject_missing_token() {
    for uri in [
        "/api/v1/auth/me",
        "/api/v1/tenant/requests",
        "/api/v1/agent/requests",
        "/api/v1/landlord/requests",
        "/api/v1/workers",
    ] {
        let app = test_app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request should build"),
            )
            .await
            .expect("request should succeed");

        assert_eq!(
            response.status(),
            StatusCode::UNAUTHORIZED,
            "{uri} must require authentication"
        );
    }
}

#[tokio::test]
async fn malformed_bearer_token_rejected() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/auth/me")
                .header("authorization", "Bearer not-a-jwt")
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).expect("body should be JSON");
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn wrong_role_is_forbidden() {
    use mendlet_api::auth::jwt::generate_access_token;
    use mendlet_core::roles::Role;

    let config = test_config();
    // A tenant token on the agent surface must be rejected by role, not
    // by authentication.
    let token = generate_access_token(uuid::Uuid::new_v4(), Role::Tenant, &config.jwt)
        .expect("token generation should succeed");

    let app = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/agent/requests")
                .header("authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
