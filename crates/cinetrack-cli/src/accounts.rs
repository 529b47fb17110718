use anyhow::{Context, Result, anyhow, bail};
use cinetrack_auth::Role;
use cinetrack_core::{evaluate_password, hash_password};
use cinetrack_db::{StoreError, UserStore};
use cinetrack_models::{NewUser, RegisterRequest, UserRecord, normalize_email};
use validator::Validate;

/// Creates an ADMIN account. Applies the same email, name and password rules
/// as self-registration.
pub async fn create_admin(
    store: &dyn UserStore,
    email: &str,
    display_name: &str,
    password: &str,
) -> Result<UserRecord> {
    let request = RegisterRequest {
        email: email.trim().to_string(),
        display_name: display_name.trim().to_string(),
        password: password.to_string(),
    };
    if let Err(errors) = request.validate() {
        bail!("invalid input: {errors}");
    }

    let strength = evaluate_password(
        password,
        &[request.display_name.as_str(), request.email.as_str()],
    );
    if !strength.is_acceptable() {
        bail!(
            "password is too weak ({:?}): {}",
            strength.level,
            strength.suggestions.join(" ")
        );
    }

    let password_hash = hash_password(password).map_err(|e| anyhow!(e.to_string()))?;

    let user = store
        .create(NewUser {
            email: normalize_email(&request.email),
            display_name: request.display_name,
            password_hash,
            role: Role::Admin,
        })
        .await
        .map_err(|e| match e {
            StoreError::Conflict(message) => anyhow!(message),
            other => anyhow!(other).context("failed to create admin"),
        })?;

    Ok(user)
}

async fn find(store: &dyn UserStore, email: &str) -> Result<UserRecord> {
    store
        .find_by_email(&normalize_email(email))
        .await
        .context("failed to look up user")?
        .ok_or_else(|| anyhow!("no user with email {email}"))
}

pub async fn set_role(store: &dyn UserStore, email: &str, role: Role) -> Result<UserRecord> {
    let user = find(store, email).await?;
    store
        .set_role(user.id, role)
        .await
        .context("failed to update role")?
        .ok_or_else(|| anyhow!("user {email} disappeared"))
}

pub async fn set_blocked(store: &dyn UserStore, email: &str, blocked: bool) -> Result<UserRecord> {
    let user = find(store, email).await?;
    store
        .set_blocked(user.id, blocked)
        .await
        .context("failed to update block status")?
        .ok_or_else(|| anyhow!("user {email} disappeared"))
}
