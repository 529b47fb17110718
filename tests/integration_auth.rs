mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{TEST_PASSWORD, TestApp, assert_error, body_json};
use serde_json::json;

#[tokio::test]
async fn test_register_login_and_me_round_trip() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/auth/register",
            None,
            json!({
                "email": "Viewer@Test.com",
                "display_name": "Viewer",
                "password": TEST_PASSWORD
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let user = body_json(response).await;
    assert_eq!(user["email"], "viewer@test.com");
    assert_eq!(user["role"], "USER");
    assert!(user.get("password_hash").is_none());

    let response = app
        .post_json(
            "/api/auth/login",
            None,
            json!({ "email": "VIEWER@test.com", "password": TEST_PASSWORD }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let login = body_json(response).await;
    assert_eq!(login["token_type"], "Bearer");
    assert_eq!(login["expires_in"], 3600);
    let token = login["access_token"].as_str().unwrap().to_string();

    let response = app.get("/api/auth/me", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["id"], user["id"]);
}

#[tokio::test]
async fn test_register_duplicate_email_is_rejected() {
    let app = TestApp::new();
    let body = json!({
        "email": "dup@test.com",
        "display_name": "Dup",
        "password": TEST_PASSWORD
    });

    let response = app.post_json("/api/auth/register", None, body.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.post_json("/api/auth/register", None, body).await;
    let body = assert_error(response, StatusCode::BAD_REQUEST, "bad_request").await;
    assert_eq!(body["error"]["message"], "Email already exists");
}

#[tokio::test]
async fn test_register_weak_password_is_validation_error() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/auth/register",
            None,
            json!({
                "email": "weak@test.com",
                "display_name": "Weak",
                "password": "abcdefgh"
            }),
        )
        .await;
    let body = assert_error(response, StatusCode::BAD_REQUEST, "validation_error").await;
    assert!(body["error"]["details"]["password"]["suggestions"].is_array());
}

#[tokio::test]
async fn test_register_invalid_email_lists_field_errors() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/auth/register",
            None,
            json!({ "email": "nope", "display_name": "", "password": "short" }),
        )
        .await;
    let body = assert_error(response, StatusCode::BAD_REQUEST, "validation_error").await;
    let details = &body["error"]["details"];
    assert!(details.get("email").is_some());
    assert!(details.get("display_name").is_some());
    assert!(details.get("password").is_some());
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_email_look_the_same() {
    let app = TestApp::new();
    app.create_user("known@test.com", cinetrack_auth::Role::User)
        .await;

    let wrong = app
        .post_json(
            "/api/auth/login",
            None,
            json!({ "email": "known@test.com", "password": "Wrong-Password-1" }),
        )
        .await;
    let wrong = assert_error(wrong, StatusCode::UNAUTHORIZED, "unauthorized").await;

    let unknown = app
        .post_json(
            "/api/auth/login",
            None,
            json!({ "email": "nobody@test.com", "password": "Wrong-Password-1" }),
        )
        .await;
    let unknown = assert_error(unknown, StatusCode::UNAUTHORIZED, "unauthorized").await;

    assert_eq!(wrong, unknown);
}

#[tokio::test]
async fn test_missing_field_and_content_type_are_bad_request() {
    let app = TestApp::new();

    let response = app
        .post_json("/api/auth/login", None, json!({ "email": "a@test.com" }))
        .await;
    let body = assert_error(response, StatusCode::BAD_REQUEST, "bad_request").await;
    assert_eq!(body["error"]["message"], "password is required");

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .body(Body::from(r#"{"email":"a@test.com","password":"x"}"#))
        .unwrap();
    let response = app.send(request).await;
    assert_error(response, StatusCode::BAD_REQUEST, "bad_request").await;
}

#[tokio::test]
async fn test_password_strength_is_public() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/auth/password-strength",
            None,
            json!({ "password": "maria2024!", "display_name": "Maria" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["score"].is_number());
    let suggestions = body["suggestions"].as_array().unwrap();
    assert!(
        suggestions
            .iter()
            .any(|s| s.as_str().unwrap().contains("name or email"))
    );
}

#[tokio::test]
async fn test_me_for_deleted_account_is_not_found() {
    let app = TestApp::new();
    let user = app
        .create_user("gone@test.com", cinetrack_auth::Role::User)
        .await;
    let token = app.token_for(&user);
    app.state.users.delete(user.id).await.unwrap();

    let response = app.get("/api/auth/me", Some(&token)).await;
    assert_error(response, StatusCode::NOT_FOUND, "not_found").await;
}
