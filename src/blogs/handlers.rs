// HTTP handlers for blog endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use validator::Validate;

use crate::auth::middleware::AuthenticatedUser;
use crate::blogs::models::{CreateBlog, ShowBlog, UpdateBlog};
use crate::error::ApiError;
use crate::users::models::User;
use crate::AppState;

/// Look up the authenticated caller's account record
///
/// A valid token can outlive its account (no revocation), so a missing row
/// is treated as an authorization failure rather than a server error.
async fn resolve_caller(state: &AppState, email: &str) -> Result<User, ApiError> {
    state
        .users
        .find_by_email(email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Account no longer exists".to_string()))
}

/// List all blogs
/// GET /blog
#[utoipa::path(
    get,
    path = "/blog",
    responses(
        (status = 200, description = "All blogs with their creators", body = Vec<ShowBlog>),
        (status = 401, description = "Missing or invalid bearer token"),
    ),
    tag = "blogs"
)]
pub async fn all_blogs_handler(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<Vec<ShowBlog>>, ApiError> {
    let blogs = state.blogs.list_with_creators().await?;
    tracing::debug!("Listed {} blogs", blogs.len());
    Ok(Json(blogs))
}

/// Create a blog attributed to the authenticated caller
/// POST /blog
#[utoipa::path(
    post,
    path = "/blog",
    request_body = CreateBlog,
    responses(
        (status = 201, description = "Blog created", body = ShowBlog),
        (status = 400, description = "Invalid input data"),
        (status = 401, description = "Missing or invalid bearer token"),
    ),
    tag = "blogs"
)]
pub async fn create_blog_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateBlog>,
) -> Result<(StatusCode, Json<ShowBlog>), ApiError> {
    payload.validate()?;

    let caller = resolve_caller(&state, &user.email).await?;
    let blog = state
        .blogs
        .create(caller.id, &payload.title, &payload.body)
        .await?;

    tracing::info!("User {} created blog {}", caller.email, blog.id);

    let response = ShowBlog {
        title: blog.title,
        body: blog.body,
        creator: caller.into(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Get a single blog
/// GET /blog/:id
#[utoipa::path(
    get,
    path = "/blog/{id}",
    params(("id" = i32, Path, description = "Blog ID")),
    responses(
        (status = 200, description = "Blog found", body = ShowBlog),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Blog not found"),
    ),
    tag = "blogs"
)]
pub async fn get_blog_handler(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<Json<ShowBlog>, ApiError> {
    let blog = state
        .blogs
        .find_with_creator(id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "Blog".to_string(),
            id: id.to_string(),
        })?;

    Ok(Json(blog))
}

/// Update a blog owned by the caller
/// PUT /blog/:id
#[utoipa::path(
    put,
    path = "/blog/{id}",
    params(("id" = i32, Path, description = "Blog ID")),
    request_body = UpdateBlog,
    responses(
        (status = 202, description = "Blog updated"),
        (status = 400, description = "Invalid input data"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 403, description = "Caller is not the creator"),
        (status = 404, description = "Blog not found"),
    ),
    tag = "blogs"
)]
pub async fn update_blog_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateBlog>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    payload.validate()?;

    let existing = state
        .blogs
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "Blog".to_string(),
            id: id.to_string(),
        })?;

    let caller = resolve_caller(&state, &user.email).await?;
    if existing.user_id != caller.id {
        return Err(ApiError::Forbidden(
            "You can only modify your own blogs".to_string(),
        ));
    }

    state
        .blogs
        .update(
            id,
            payload.title.as_deref().unwrap_or(&existing.title),
            payload.body.as_deref().unwrap_or(&existing.body),
        )
        .await?;

    tracing::info!("User {} updated blog {}", caller.email, id);
    Ok((
        StatusCode::ACCEPTED,
        Json(json!({ "detail": "Blog updated successfully" })),
    ))
}

/// Delete a blog owned by the caller
/// DELETE /blog/:id
#[utoipa::path(
    delete,
    path = "/blog/{id}",
    params(("id" = i32, Path, description = "Blog ID")),
    responses(
        (status = 204, description = "Blog deleted"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 403, description = "Caller is not the creator"),
        (status = 404, description = "Blog not found"),
    ),
    tag = "blogs"
)]
pub async fn delete_blog_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let existing = state
        .blogs
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "Blog".to_string(),
            id: id.to_string(),
        })?;

    let caller = resolve_caller(&state, &user.email).await?;
    if existing.user_id != caller.id {
        return Err(ApiError::Forbidden(
            "You can only delete your own blogs".to_string(),
        ));
    }

    state.blogs.delete(id).await?;

    tracing::info!("User {} deleted blog {}", caller.email, id);
    Ok(StatusCode::NO_CONTENT)
}
