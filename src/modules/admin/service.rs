use cinetrack_auth::Role;
use cinetrack_core::{AppError, PaginationMeta, PaginationParams};
use cinetrack_db::UserStore;
use cinetrack_models::{PaginatedUsersResponse, User};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::metrics::track_moderation_action;

const USER_NOT_FOUND: &str = "User not found";

pub struct AdminService;

impl AdminService {
    #[instrument(skip(users))]
    pub async fn list_users(
        users: &dyn UserStore,
        pagination: PaginationParams,
    ) -> Result<PaginatedUsersResponse, AppError> {
        let total = users.count().await?;
        let data = users
            .list(pagination.offset(), pagination.limit())
            .await?
            .into_iter()
            .map(User::from)
            .collect();

        Ok(PaginatedUsersResponse {
            data,
            meta: PaginationMeta::new(total, &pagination),
        })
    }

    pub async fn get_user(users: &dyn UserStore, id: Uuid) -> Result<User, AppError> {
        users
            .find_by_id(id)
            .await?
            .map(User::from)
            .ok_or_else(|| AppError::not_found(USER_NOT_FOUND))
    }

    /// Changes a role. An admin cannot demote themselves.
    #[instrument(skip(users))]
    pub async fn set_role(
        users: &dyn UserStore,
        acting_admin: Uuid,
        id: Uuid,
        role: Role,
    ) -> Result<User, AppError> {
        if id == acting_admin && role != Role::Admin {
            return Err(AppError::bad_request(
                "Administrators cannot change their own role",
            ));
        }

        let user = users
            .set_role(id, role)
            .await?
            .ok_or_else(|| AppError::not_found(USER_NOT_FOUND))?;

        track_moderation_action("set_role");
        info!(target_user = %id, %role, "Role changed");
        Ok(user.into())
    }

    #[instrument(skip(users))]
    pub async fn set_blocked(
        users: &dyn UserStore,
        acting_admin: Uuid,
        id: Uuid,
        blocked: bool,
    ) -> Result<User, AppError> {
        if id == acting_admin && blocked {
            return Err(AppError::bad_request(
                "Administrators cannot block their own account",
            ));
        }

        let user = users
            .set_blocked(id, blocked)
            .await?
            .ok_or_else(|| AppError::not_found(USER_NOT_FOUND))?;

        track_moderation_action(if blocked { "block" } else { "unblock" });
        info!(target_user = %id, blocked, "Block status changed");
        Ok(user.into())
    }

    #[instrument(skip(users))]
    pub async fn delete_user(
        users: &dyn UserStore,
        acting_admin: Uuid,
        id: Uuid,
    ) -> Result<(), AppError> {
        if id == acting_admin {
            return Err(AppError::bad_request(
                "Administrators cannot delete their own account",
            ));
        }

        if !users.delete(id).await? {
            return Err(AppError::not_found(USER_NOT_FOUND));
        }

        track_moderation_action("delete_user");
        info!(target_user = %id, "User deleted");
        Ok(())
    }
}
