//! User administration endpoints. Mounted behind the administrator guard.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};

use super::{success, success_with, ApiResult, Empty, UserPayload, UsersPayload};
use crate::auth::{hash_password, SessionUser};
use crate::db::DUPLICATE_USERNAME;
use crate::errors::AppError;
use crate::models::{non_blank, CreateUserRequest, UpdateUserRequest, UserChanges, UserRole};
use crate::AppState;

fn parse_role(raw: &str) -> Result<UserRole, AppError> {
    raw.parse()
        .map_err(|_| AppError::Validation("Invalid role".to_string()))
}

/// GET /api/users - List all users (without password hashes).
pub async fn list_users(State(state): State<AppState>) -> ApiResult<UsersPayload> {
    let users = state.repo.list_users().await?;
    success(UsersPayload { users })
}

/// POST /api/users - Create a new user.
pub async fn create_user(
    State(state): State<AppState>,
    Extension(caller): Extension<SessionUser>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> ApiResult<UserPayload> {
    let Json(request) = payload?;

    let (Some(username), Some(password), Some(role)) = (
        non_blank(request.username.as_ref()),
        non_blank(request.password.as_ref()),
        non_blank(request.role.as_ref()),
    ) else {
        return Err(AppError::Validation("All fields are required".to_string()));
    };
    let role = parse_role(role)?;

    // Friendly pre-check; the store's UNIQUE constraint closes the race.
    if state.repo.username_taken(username, None).await? {
        return Err(AppError::Validation(DUPLICATE_USERNAME.to_string()));
    }

    let password_hash = hash_password(password, state.config.bcrypt_cost).await?;
    let user = state
        .repo
        .create_user(username, &password_hash, role)
        .await?;

    tracing::info!(actor = %caller.username, username = %user.username, role = %user.role, "User created");
    success_with(UserPayload { user }, "User created successfully")
}

/// PUT /api/users/{id} - Partially update a user.
pub async fn update_user(
    State(state): State<AppState>,
    Extension(caller): Extension<SessionUser>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> ApiResult<UserPayload> {
    let Json(request) = payload?;

    let existing = state
        .repo
        .get_user(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let mut changes = UserChanges {
        role: non_blank(request.role.as_ref()).map(parse_role).transpose()?,
        ..Default::default()
    };

    if let Some(username) = non_blank(request.username.as_ref()) {
        if username != existing.username {
            if state.repo.username_taken(username, Some(&id)).await? {
                return Err(AppError::Validation(DUPLICATE_USERNAME.to_string()));
            }
            changes.username = Some(username.to_string());
        }
    }

    if let Some(password) = non_blank(request.password.as_ref()) {
        changes.password_hash = Some(hash_password(password, state.config.bcrypt_cost).await?);
    }

    let user = state.repo.update_user(&id, &changes).await?;

    tracing::info!(actor = %caller.username, user_id = %id, "User updated");
    success_with(UserPayload { user }, "User updated successfully")
}

/// DELETE /api/users/{id} - Delete a user other than the caller.
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(caller): Extension<SessionUser>,
    Path(id): Path<String>,
) -> ApiResult<Empty> {
    if id == caller.id {
        return Err(AppError::Validation(
            "Cannot delete your own account".to_string(),
        ));
    }

    state.repo.delete_user(&id).await?;

    tracing::info!(actor = %caller.username, user_id = %id, "User deleted");
    success_with(Empty {}, "User deleted successfully")
}
