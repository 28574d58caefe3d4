// HTTP handlers for user endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use validator::Validate;

use crate::auth::{middleware::AuthenticatedUser, password::PasswordService};
use crate::error::ApiError;
use crate::users::models::{CreateUser, ShowUser, UpdateUser};
use crate::AppState;

/// Register a new user
/// POST /user
#[utoipa::path(
    post,
    path = "/user",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = ShowUser),
        (status = 400, description = "Invalid input data"),
        (status = 409, description = "Email already registered"),
    ),
    tag = "users"
)]
pub async fn create_user_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateUser>,
) -> Result<(StatusCode, Json<ShowUser>), ApiError> {
    payload.validate()?;

    let password_hash = PasswordService::hash_password(&payload.password)
        .map_err(|_| ApiError::InternalError("Failed to hash password".to_string()))?;

    let user = state
        .users
        .create(&payload.name, &payload.email, &password_hash)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return ApiError::Conflict {
                        message: format!("User with email '{}' already exists", payload.email),
                    };
                }
            }
            ApiError::from(e)
        })?;

    tracing::info!("Registered user {} (id {})", user.email, user.id);

    let response = ShowUser {
        name: user.name,
        email: user.email,
        blogs: vec![],
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Get a user with their blogs
/// GET /user/:id
#[utoipa::path(
    get,
    path = "/user/{id}",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = ShowUser),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "User not found"),
    ),
    tag = "users"
)]
pub async fn get_user_handler(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<Json<ShowUser>, ApiError> {
    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "User".to_string(),
            id: id.to_string(),
        })?;

    let blogs = state.blogs.find_by_user(user.id).await?;

    Ok(Json(ShowUser {
        name: user.name,
        email: user.email,
        blogs,
    }))
}

/// Update the caller's own account
/// PUT /user/:id
#[utoipa::path(
    put,
    path = "/user/{id}",
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUser,
    responses(
        (status = 202, description = "User updated"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 403, description = "Caller does not own this account"),
        (status = 404, description = "User not found"),
    ),
    tag = "users"
)]
pub async fn update_user_handler(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateUser>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    payload.validate()?;

    let existing = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "User".to_string(),
            id: id.to_string(),
        })?;

    if !existing.email.eq_ignore_ascii_case(&auth.email) {
        return Err(ApiError::Forbidden(
            "You can only modify your own account".to_string(),
        ));
    }

    let new_email = payload.email.as_deref().unwrap_or(&existing.email);

    let password_hash = match payload.password {
        Some(new_password) => PasswordService::hash_password(&new_password)
            .map_err(|_| ApiError::InternalError("Failed to hash password".to_string()))?,
        None => existing.password_hash.clone(),
    };

    state
        .users
        .update(
            id,
            payload.name.as_deref().unwrap_or(&existing.name),
            new_email,
            &password_hash,
        )
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return ApiError::Conflict {
                        message: format!("User with email '{}' already exists", new_email),
                    };
                }
            }
            ApiError::from(e)
        })?;

    tracing::info!("Updated user id {}", id);
    Ok((
        StatusCode::ACCEPTED,
        Json(json!({ "detail": "User updated successfully" })),
    ))
}

/// Delete the caller's own account
/// DELETE /user/:id
#[utoipa::path(
    delete,
    path = "/user/{id}",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 403, description = "Caller does not own this account"),
        (status = 404, description = "User not found"),
    ),
    tag = "users"
)]
pub async fn delete_user_handler(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let existing = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "User".to_string(),
            id: id.to_string(),
        })?;

    if !existing.email.eq_ignore_ascii_case(&auth.email) {
        return Err(ApiError::Forbidden(
            "You can only delete your own account".to_string(),
        ));
    }

    state.users.delete(id).await?;

    tracing::info!("Deleted user id {}", id);
    Ok(StatusCode::NO_CONTENT)
}
