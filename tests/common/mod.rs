#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use cinetrack::router::init_router;
use cinetrack::state::AppState;
use cinetrack_auth::{FixedClock, Role, TokenService};
use cinetrack_config::{AccessConfig, CorsConfig, JwtConfig};
use cinetrack_core::hash_password;
use cinetrack_db::{MemoryStore, UserStore};
use cinetrack_models::{NewUser, UserRecord};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const TEST_PASSWORD: &str = "Correct-Horse-Battery-9";

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
}

pub fn test_tokens() -> TokenService {
    TokenService::with_clock(
        &JwtConfig {
            secret: TEST_SECRET.to_string(),
            access_token_expiry: 3600,
        },
        Arc::new(FixedClock(t0())),
    )
}

pub struct TestApp {
    pub state: AppState,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_access(&AccessConfig::default())
    }

    pub fn with_access(access: &AccessConfig) -> Self {
        let state = AppState::in_memory(test_tokens(), access);
        Self::from_state(state)
    }

    pub fn with_users(users: Arc<dyn UserStore>) -> Self {
        let watchlist = Arc::new(MemoryStore::new());
        let state = AppState::new(
            users,
            watchlist,
            test_tokens(),
            CorsConfig {
                allowed_origins: Vec::new(),
            },
            &AccessConfig::default(),
        );
        Self::from_state(state)
    }

    fn from_state(state: AppState) -> Self {
        let router = init_router(state.clone());
        Self { state, router }
    }

    /// Inserts an account straight into the store.
    pub async fn create_user(&self, email: &str, role: Role) -> UserRecord {
        self.state
            .users
            .create(NewUser {
                email: email.to_string(),
                display_name: "Test User".to_string(),
                password_hash: hash_password(TEST_PASSWORD).unwrap(),
                role,
            })
            .await
            .unwrap()
    }

    pub fn token_for(&self, user: &UserRecord) -> String {
        self.state.tokens.issue(user.id, user.role).unwrap().token
    }

    pub fn token_with_role(&self, id: Uuid, role: Role) -> String {
        self.state.tokens.issue(id, role).unwrap().token
    }

    /// A correctly signed token that expired an hour before `t0`.
    pub fn expired_token(&self, user: &UserRecord) -> String {
        self.state
            .tokens
            .issue_at(user.id, user.role, t0() - chrono::Duration::hours(2))
            .unwrap()
            .token
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Response {
        self.send(request("GET", uri, token, None)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> Response {
        self.send(request("DELETE", uri, token, None)).await
    }

    pub async fn post_json(&self, uri: &str, token: Option<&str>, body: Value) -> Response {
        self.send(request("POST", uri, token, Some(body))).await
    }

    pub async fn patch_json(&self, uri: &str, token: Option<&str>, body: Value) -> Response {
        self.send(request("PATCH", uri, token, Some(body))).await
    }
}

pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn body_json(response: Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Asserts the response is an error envelope with the given status and type.
pub async fn assert_error(response: Response, status: StatusCode, kind: &str) -> Value {
    assert_eq!(response.status(), status);
    let body = body_json(response).await;
    assert_eq!(body["error"]["type"], kind, "unexpected envelope: {body}");
    assert!(body["error"]["message"].is_string());
    body
}
