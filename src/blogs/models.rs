// Blog data models and DTOs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::users::models::UserPublic;

/// Blog database model
#[derive(Debug, Clone, FromRow)]
pub struct Blog {
    pub id: i32,
    pub title: String,
    pub body: String,
    pub user_id: i32,
}

/// Blog creation request DTO
///
/// The creator is never taken from the payload; the new blog is attributed
/// to the authenticated caller.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBlog {
    #[validate(length(min = 1))]
    #[schema(example = "My first post")]
    pub title: String,
    pub body: String,
}

/// Partial update request DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBlog {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub body: Option<String>,
}

/// Compact blog view, used when listing a user's blogs
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BlogSummary {
    pub title: String,
    pub body: String,
}

/// Blog detail response with the creator inlined
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ShowBlog {
    pub title: String,
    pub body: String,
    pub creator: UserPublic,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_blog_requires_title() {
        let untitled: CreateBlog =
            serde_json::from_str(r#"{"title": "", "body": "text"}"#).unwrap();
        assert!(untitled.validate().is_err());

        let valid: CreateBlog =
            serde_json::from_str(r#"{"title": "Hello", "body": "text"}"#).unwrap();
        assert!(valid.validate().is_ok());
    }

    #[test]
    fn test_update_blog_accepts_partial_payload() {
        let partial: UpdateBlog = serde_json::from_str(r#"{"body": "new body"}"#).unwrap();
        assert!(partial.validate().is_ok());
        assert!(partial.title.is_none());
        assert_eq!(partial.body.as_deref(), Some("new body"));
    }

    #[test]
    fn test_show_blog_serializes_creator() {
        let show = ShowBlog {
            title: "Hello".to_string(),
            body: "text".to_string(),
            creator: UserPublic {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            },
        };

        let json = serde_json::to_value(&show).unwrap();
        assert_eq!(json["creator"]["name"], "Ada");
        assert_eq!(json["creator"]["email"], "ada@example.com");
    }
}
