//! Integration tests for the authentication endpoints.
//!
//! These cover the request paths that terminate before the credential
//! store: input validation, token checks, and health.

mod helpers;

use http::StatusCode;

#[tokio::test]
async fn test_register_with_empty_fields_is_rejected() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/register",
            Some(serde_json::json!({
                "email": "",
                "password": "",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_login_with_missing_password_is_rejected() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/login",
            Some(serde_json::json!({
                "email": "user@example.com",
                "password": "",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_me_without_token_is_unauthorized() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_me_with_garbage_token_is_unauthorized() {
    let app = helpers::TestApp::new();

    let response = app
        .request("GET", "/me", None, Some("not.a.real.token"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_with_foreign_signature_is_unauthorized() {
    let app = helpers::TestApp::new();

    // Token signed with a different secret than the app's.
    let mut config = app.config.auth.clone();
    config.jwt_secret = "some-other-secret".to_string();
    let encoder = authgate_auth::jwt::JwtEncoder::new(&config);
    let issued = encoder.issue(uuid::Uuid::new_v4()).expect("issue");

    let response = app
        .request("GET", "/me", None, Some(&issued.token))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_reports_database_state() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/health", None, None).await;

    // The test pool points at an unreachable server, so the endpoint
    // stays up but reports the database as down.
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "degraded");
    assert_eq!(response.body["data"]["database"], false);
    assert!(response.body["data"]["version"].is_string());
}
