// Error handling for the blog API
// Centralized error type and HTTP response conversion for the CRUD layer

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, error, warn};

/// Main error type for the CRUD handlers
///
/// Authentication failures have their own type (`auth::AuthError`); this
/// enum covers everything downstream of a resolved identity.
#[derive(Debug)]
pub enum ApiError {
    /// Request validation failures, maps to 400
    ValidationError(validator::ValidationErrors),

    /// Resource lookup by id came up empty, maps to 404
    NotFound { resource: String, id: String },

    /// Duplicate resource, maps to 409
    Conflict { message: String },

    /// Database failures, maps to 500 with details kept server-side
    DatabaseError(sqlx::Error),

    /// Other internal failures, maps to 500 with details kept server-side
    InternalError(String),

    /// Identity resolved but no longer backed by an account, maps to 401
    Unauthorized(String),

    /// Caller does not own the resource, maps to 403
    Forbidden(String),
}

/// Uniform JSON error envelope
#[derive(Serialize)]
pub struct ErrorResponse {
    /// Machine-readable error code (e.g. "NOT_FOUND")
    pub error_code: String,

    /// Human-readable message
    pub message: String,

    /// Field-level details, omitted when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,

    /// ISO 8601 timestamp of the failure
    pub timestamp: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_response) = self.to_error_response();
        if status == StatusCode::UNAUTHORIZED {
            (
                status,
                [(header::WWW_AUTHENTICATE, "Bearer")],
                Json(error_response),
            )
                .into_response()
        } else {
            (status, Json(error_response)).into_response()
        }
    }
}

impl ApiError {
    fn to_error_response(&self) -> (StatusCode, ErrorResponse) {
        match self {
            ApiError::ValidationError(errors) => {
                debug!("Validation error: {:?}", errors);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error_code: "VALIDATION_ERROR".to_string(),
                        message: "Request validation failed".to_string(),
                        details: Some(
                            serde_json::to_value(errors).unwrap_or(serde_json::json!({})),
                        ),
                        timestamp: Utc::now().to_rfc3339(),
                    },
                )
            }
            ApiError::NotFound { resource, id } => {
                debug!("{} with id {} not found", resource, id);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse {
                        error_code: "NOT_FOUND".to_string(),
                        message: format!("{} with the id {} is not available", resource, id),
                        details: None,
                        timestamp: Utc::now().to_rfc3339(),
                    },
                )
            }
            ApiError::Conflict { message } => {
                warn!("Conflict: {}", message);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error_code: "CONFLICT".to_string(),
                        message: message.clone(),
                        details: None,
                        timestamp: Utc::now().to_rfc3339(),
                    },
                )
            }
            ApiError::DatabaseError(db_error) => {
                // Full detail stays in the server log
                error!("Database error: {:?}", db_error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error_code: "DATABASE_ERROR".to_string(),
                        message: "A database error occurred".to_string(),
                        details: None,
                        timestamp: Utc::now().to_rfc3339(),
                    },
                )
            }
            ApiError::InternalError(internal_msg) => {
                error!("Internal error: {}", internal_msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error_code: "INTERNAL_ERROR".to_string(),
                        message: "An internal server error occurred".to_string(),
                        details: None,
                        timestamp: Utc::now().to_rfc3339(),
                    },
                )
            }
            ApiError::Unauthorized(message) => {
                warn!("Unauthorized: {}", message);
                (
                    StatusCode::UNAUTHORIZED,
                    ErrorResponse {
                        error_code: "UNAUTHORIZED".to_string(),
                        message: message.clone(),
                        details: None,
                        timestamp: Utc::now().to_rfc3339(),
                    },
                )
            }
            ApiError::Forbidden(message) => {
                warn!("Forbidden: {}", message);
                (
                    StatusCode::FORBIDDEN,
                    ErrorResponse {
                        error_code: "FORBIDDEN".to_string(),
                        message: message.clone(),
                        details: None,
                        timestamp: Utc::now().to_rfc3339(),
                    },
                )
            }
        }
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(error: sqlx::Error) -> Self {
        ApiError::DatabaseError(error)
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::ValidationError(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let not_found = ApiError::NotFound {
            resource: "Blog".to_string(),
            id: "7".to_string(),
        };
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);

        let conflict = ApiError::Conflict {
            message: "duplicate".to_string(),
        };
        assert_eq!(conflict.status_code(), StatusCode::CONFLICT);

        assert_eq!(
            ApiError::Forbidden("nope".to_string()).status_code(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_not_found_message_names_resource_and_id() {
        let err = ApiError::NotFound {
            resource: "Blog".to_string(),
            id: "42".to_string(),
        };
        let (status, body) = err.to_error_response();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.message, "Blog with the id 42 is not available");
    }

    #[test]
    fn test_internal_errors_hide_details_from_clients() {
        let err = ApiError::InternalError("secret stack trace".to_string());
        let (_, body) = err.to_error_response();
        assert!(!body.message.contains("secret"));
    }

    #[test]
    fn test_unauthorized_carries_bearer_challenge() {
        let response = ApiError::Unauthorized("gone".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response
                .headers()
                .get(header::WWW_AUTHENTICATE)
                .and_then(|v| v.to_str().ok()),
            Some("Bearer")
        );
    }
}
