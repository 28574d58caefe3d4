// User data models and DTOs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::blogs::models::BlogSummary;

/// User database model
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Registration request DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 1))]
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[validate(email)]
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
}

/// Partial update request DTO
///
/// Omitted fields keep their current values; a new password is re-hashed
/// before storage.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 8))]
    pub password: Option<String>,
}

/// Public view of a user (never contains the password hash)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserPublic {
    pub name: String,
    pub email: String,
}

impl From<User> for UserPublic {
    fn from(user: User) -> Self {
        Self {
            name: user.name,
            email: user.email,
        }
    }
}

/// User detail response: public fields plus the user's blogs
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ShowUser {
    pub name: String,
    pub email: String,
    pub blogs: Vec<BlogSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_validation() {
        let valid: CreateUser = serde_json::from_str(
            r#"{"name": "Ada", "email": "ada@example.com", "password": "longenough"}"#,
        )
        .unwrap();
        assert!(valid.validate().is_ok());

        let bad_email: CreateUser = serde_json::from_str(
            r#"{"name": "Ada", "email": "nope", "password": "longenough"}"#,
        )
        .unwrap();
        assert!(bad_email.validate().is_err());

        let short_password: CreateUser = serde_json::from_str(
            r#"{"name": "Ada", "email": "ada@example.com", "password": "short"}"#,
        )
        .unwrap();
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_update_user_accepts_partial_payload() {
        let partial: UpdateUser = serde_json::from_str(r#"{"name": "Grace"}"#).unwrap();
        assert!(partial.validate().is_ok());
        assert_eq!(partial.name.as_deref(), Some("Grace"));
        assert!(partial.email.is_none());
        assert!(partial.password.is_none());
    }

    #[test]
    fn test_user_public_omits_password_hash() {
        let user = User {
            id: 1,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
        };

        let json = serde_json::to_string(&UserPublic::from(user)).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password"));
    }
}
