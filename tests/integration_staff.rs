mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use cinetrack_auth::Role;
use cinetrack_config::AccessConfig;
use cinetrack_db::{StoreError, UserStore};
use cinetrack_models::{NewUser, UserRecord};
use common::{TestApp, assert_error, body_json};
use serde_json::json;
use uuid::Uuid;

const STAFF_ROUTE: &str = "/api/staff/overview";

#[tokio::test]
async fn test_blocked_staff_is_forbidden_with_valid_token() {
    let app = TestApp::new();
    let staff = app.create_user("staff@test.com", Role::Staff).await;
    let token = app.token_for(&staff);
    app.state.users.set_blocked(staff.id, true).await.unwrap();

    let response = app.get(STAFF_ROUTE, Some(&token)).await;
    let body = assert_error(response, StatusCode::FORBIDDEN, "forbidden").await;
    assert_eq!(body["error"]["message"], "Account is blocked");
}

#[tokio::test]
async fn test_demoted_staff_with_stale_token_is_forbidden() {
    let app = TestApp::new();
    let staff = app.create_user("staff@test.com", Role::Staff).await;
    let token = app.token_for(&staff);
    app.state.users.set_role(staff.id, Role::User).await.unwrap();

    let response = app.get(STAFF_ROUTE, Some(&token)).await;
    assert_error(response, StatusCode::FORBIDDEN, "forbidden").await;
}

#[tokio::test]
async fn test_promoted_user_with_stale_token_reaches_staff_route() {
    let app = TestApp::new();
    let user = app.create_user("user@test.com", Role::User).await;
    let token = app.token_for(&user);
    app.state.users.set_role(user.id, Role::Staff).await.unwrap();

    let response = app.get(STAFF_ROUTE, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_deleted_account_is_unauthorized_on_staff_route() {
    let app = TestApp::new();
    let staff = app.create_user("staff@test.com", Role::Staff).await;
    let token = app.token_for(&staff);
    assert!(app.state.users.delete(staff.id).await.unwrap());

    let response = app.get(STAFF_ROUTE, Some(&token)).await;
    assert_error(response, StatusCode::UNAUTHORIZED, "unauthorized").await;
}

#[tokio::test]
async fn test_configured_allow_list_narrows_staff_routes() {
    let app = TestApp::with_access(&AccessConfig {
        staff_roles: vec!["ADMIN".to_string(), "NOT_A_ROLE".to_string()],
    });
    let staff = app.create_user("staff@test.com", Role::Staff).await;
    let admin = app.create_user("admin@test.com", Role::Admin).await;

    let response = app.get(STAFF_ROUTE, Some(&app.token_for(&staff))).await;
    assert_error(response, StatusCode::FORBIDDEN, "forbidden").await;

    let response = app.get(STAFF_ROUTE, Some(&app.token_for(&admin))).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_empty_allow_list_denies_everyone() {
    let app = TestApp::with_access(&AccessConfig {
        staff_roles: Vec::new(),
    });
    let admin = app.create_user("admin@test.com", Role::Admin).await;

    let response = app.get(STAFF_ROUTE, Some(&app.token_for(&admin))).await;
    assert_error(response, StatusCode::FORBIDDEN, "forbidden").await;
}

#[tokio::test]
async fn test_staff_views_and_moderates_another_users_watchlist() {
    let app = TestApp::new();
    let staff = app.create_user("staff@test.com", Role::Staff).await;
    let user = app.create_user("user@test.com", Role::User).await;
    let staff_token = app.token_for(&staff);
    let user_token = app.token_for(&user);

    let response = app
        .post_json(
            "/api/watchlist",
            Some(&user_token),
            json!({ "media_type": "movie", "media_id": 603, "title": "The Matrix" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let entry_id = body_json(response).await["id"].as_str().unwrap().to_string();

    let uri = format!("/api/staff/users/{}/watchlist", user.id);
    let response = app.get(&uri, Some(&staff_token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["data"][0]["title"], "The Matrix");

    let response = app
        .delete(&format!("/api/staff/watchlist/{}", entry_id), Some(&staff_token))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .get(&format!("/api/watchlist/{}", entry_id), Some(&user_token))
        .await;
    assert_error(response, StatusCode::NOT_FOUND, "not_found").await;
}

#[tokio::test]
async fn test_staff_watchlist_of_unknown_user_is_not_found() {
    let app = TestApp::new();
    let staff = app.create_user("staff@test.com", Role::Staff).await;

    let uri = format!("/api/staff/users/{}/watchlist", Uuid::new_v4());
    let response = app.get(&uri, Some(&app.token_for(&staff))).await;
    assert_error(response, StatusCode::NOT_FOUND, "not_found").await;
}

/// A user store whose every read fails.
#[derive(Debug)]
struct BrokenStore;

fn broken() -> StoreError {
    StoreError::Corrupt("connection reset".to_string())
}

#[async_trait]
impl UserStore for BrokenStore {
    async fn find_by_id(&self, _id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        Err(broken())
    }
    async fn find_by_email(&self, _email: &str) -> Result<Option<UserRecord>, StoreError> {
        Err(broken())
    }
    async fn create(&self, _user: NewUser) -> Result<UserRecord, StoreError> {
        Err(broken())
    }
    async fn list(&self, _offset: i64, _limit: i64) -> Result<Vec<UserRecord>, StoreError> {
        Err(broken())
    }
    async fn count(&self) -> Result<i64, StoreError> {
        Err(broken())
    }
    async fn count_blocked(&self) -> Result<i64, StoreError> {
        Err(broken())
    }
    async fn count_by_role(&self, _role: Role) -> Result<i64, StoreError> {
        Err(broken())
    }
    async fn set_role(&self, _id: Uuid, _role: Role) -> Result<Option<UserRecord>, StoreError> {
        Err(broken())
    }
    async fn set_blocked(
        &self,
        _id: Uuid,
        _blocked: bool,
    ) -> Result<Option<UserRecord>, StoreError> {
        Err(broken())
    }
    async fn delete(&self, _id: Uuid) -> Result<bool, StoreError> {
        Err(broken())
    }
}

#[tokio::test]
async fn test_store_failure_during_live_lookup_is_internal_error() {
    let app = TestApp::with_users(Arc::new(BrokenStore));
    let token = app.token_with_role(Uuid::new_v4(), Role::Staff);

    let response = app.get(STAFF_ROUTE, Some(&token)).await;
    let body = assert_error(
        response,
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal_error",
    )
    .await;
    assert_eq!(body["error"]["message"], "Internal server error");
    assert!(!body.to_string().contains("connection reset"));
}

#[tokio::test]
async fn test_store_failure_does_not_affect_token_only_levels() {
    let app = TestApp::with_users(Arc::new(BrokenStore));
    let token = app.token_with_role(Uuid::new_v4(), Role::User);

    let response = app.get("/api/watchlist", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
}
