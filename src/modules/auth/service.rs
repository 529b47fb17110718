use cinetrack_auth::{Role, TokenService};
use cinetrack_core::{AppError, PasswordStrength, evaluate_password, hash_password, verify_password};
use cinetrack_db::UserStore;
use cinetrack_models::{
    LoginRequest, LoginResponse, NewUser, RegisterRequest, User, normalize_email,
};
use serde_json::json;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::metrics::{
    track_jwt_issued, track_user_login_failure, track_user_login_success, track_user_registered,
};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub struct AuthService;

impl AuthService {
    /// Scores `password`, penalizing reuse of the email local part and display name.
    pub fn password_strength(password: &str, email: &str, display_name: &str) -> PasswordStrength {
        let local_part = email.split('@').next().unwrap_or(email);
        evaluate_password(password, &[local_part, display_name])
    }

    #[instrument(skip(users, dto), fields(email = %dto.email))]
    pub async fn register(users: &dyn UserStore, dto: RegisterRequest) -> Result<User, AppError> {
        let email = normalize_email(&dto.email);
        let display_name = dto.display_name.trim().to_string();

        let strength = Self::password_strength(&dto.password, &email, &display_name);
        if !strength.is_acceptable() {
            return Err(AppError::validation(
                "Password is too weak",
                json!({ "password": strength }),
            ));
        }

        if users.find_by_email(&email).await?.is_some() {
            return Err(AppError::bad_request("Email already exists"));
        }

        let password_hash = hash_password(&dto.password)?;

        let user = users
            .create(NewUser {
                email,
                display_name,
                password_hash,
                role: Role::User,
            })
            .await?;

        track_user_registered();
        info!(user_id = %user.id, "User registered");

        Ok(user.into())
    }

    #[instrument(skip(users, tokens, dto), fields(email = %dto.email))]
    pub async fn login(
        users: &dyn UserStore,
        tokens: &TokenService,
        dto: LoginRequest,
    ) -> Result<LoginResponse, AppError> {
        let Some(user) = users.find_by_email(&normalize_email(&dto.email)).await? else {
            track_user_login_failure("unknown_email");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !verify_password(&dto.password, &user.password_hash)? {
            track_user_login_failure("wrong_password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        if user.blocked {
            track_user_login_failure("blocked");
            warn!(user_id = %user.id, "Login attempt on blocked account");
            return Err(AppError::forbidden("Account is blocked"));
        }

        let issued = tokens.issue(user.id, user.role)?;
        track_jwt_issued();
        track_user_login_success(user.role.as_str());

        Ok(LoginResponse::bearer(
            issued.token,
            tokens.expiry_secs(),
            user.into(),
        ))
    }

    pub async fn profile(users: &dyn UserStore, user_id: Uuid) -> Result<User, AppError> {
        users
            .find_by_id(user_id)
            .await?
            .map(User::from)
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_strength_penalizes_personal_details() {
        let plain = AuthService::password_strength("Kubrick-Odyssey-68", "a@example.com", "Ann");
        let personal =
            AuthService::password_strength("Kubrick-Odyssey-68", "kubrick@example.com", "Stan");
        assert!(personal.score < plain.score);
    }
}
