// HTTP handler for the login endpoint

use axum::{extract::State, Json};
use validator::Validate;

use crate::auth::{
    error::AuthError,
    models::{LoginRequest, TokenResponse},
};
use crate::AppState;

/// Login with email and password
/// POST /login
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Invalid credentials"),
    ),
    tag = "authentication"
)]
pub async fn login_handler(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AuthError> {
    // Reject syntactically invalid emails before touching the database
    if request.validate().is_err() {
        return Err(AuthError::InvalidCredentials);
    }

    let response = state.auth.login(&request.email, &request.password).await?;
    Ok(Json(response))
}
