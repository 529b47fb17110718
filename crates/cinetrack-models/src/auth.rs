//! Authentication DTOs: registration, login and password checks.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::users::User;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email address"))]
    #[schema(example = "film.buff@example.com")]
    pub email: String,
    #[validate(length(min = 1, max = 80, message = "Display name must be 1-80 characters"))]
    pub display_name: String,
    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    #[schema(example = "Blade-Runner-2049-Rules")]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    #[schema(example = "password123")]
    pub password: String,
}

/// Successful login: a bearer access token and the account it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    pub user: User,
}

impl LoginResponse {
    #[must_use]
    pub fn bearer(access_token: String, expires_in: i64, user: User) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}

/// Checks a candidate password. `email` and `display_name` are optional
/// hints penalized when the password contains them.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct PasswordStrengthRequest {
    #[validate(length(min = 1, max = 128))]
    pub password: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

impl PasswordStrengthRequest {
    /// Penalty hints: the display name and the local part of the email.
    #[must_use]
    pub fn user_inputs(&self) -> Vec<&str> {
        let mut inputs = Vec::new();
        if let Some(email) = &self.email {
            inputs.push(email.split('@').next().unwrap_or(email));
        }
        if let Some(name) = &self.display_name {
            inputs.push(name.as_str());
        }
        inputs
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
