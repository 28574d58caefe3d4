// Authentication error types and their HTTP mapping

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

/// Authentication failures
///
/// Login failures (`InvalidCredentials`) map to 400 with a deliberately
/// generic message, so the response does not reveal whether the email
/// exists. Token failures all map to 401 with a `WWW-Authenticate: Bearer`
/// challenge; expired and tampered tokens are distinguished internally but
/// look identical to the client.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Missing authentication token")]
    MissingToken,

    #[error("Token generation error: {0}")]
    TokenGenerationError(String),

    #[error("Password hashing error")]
    PasswordHashError,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl AuthError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials => StatusCode::BAD_REQUEST,
            AuthError::InvalidToken | AuthError::ExpiredToken | AuthError::MissingToken => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::TokenGenerationError(_)
            | AuthError::PasswordHashError
            | AuthError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message (no sensitive data)
    fn client_message(&self) -> String {
        match self {
            AuthError::InvalidCredentials => "Invalid email or password".to_string(),
            AuthError::InvalidToken | AuthError::ExpiredToken | AuthError::MissingToken => {
                "Could not validate credentials".to_string()
            }
            AuthError::TokenGenerationError(_)
            | AuthError::PasswordHashError
            | AuthError::DatabaseError(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match &self {
            AuthError::InvalidCredentials => {
                warn!("Login attempt with invalid credentials");
            }
            AuthError::InvalidToken => {
                warn!("Invalid token presented");
            }
            AuthError::ExpiredToken => {
                warn!("Expired token presented");
            }
            AuthError::MissingToken => {
                warn!("Protected endpoint called without a bearer token");
            }
            AuthError::TokenGenerationError(msg) => {
                error!("Token generation error: {}", msg);
            }
            AuthError::PasswordHashError => {
                error!("Password hashing error");
            }
            AuthError::DatabaseError(msg) => {
                error!("Database error in auth: {}", msg);
            }
        }

        let status = self.status_code();
        let body = Json(json!({ "error": self.client_message() }));

        if status == StatusCode::UNAUTHORIZED {
            // 401 carries the re-authentication challenge
            (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}
