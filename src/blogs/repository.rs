// Database access for blogs

use sqlx::{FromRow, PgPool};

use crate::blogs::models::{Blog, BlogSummary, ShowBlog};
use crate::users::models::UserPublic;

/// Flat row for blog + creator joins
#[derive(FromRow)]
struct BlogWithCreatorRow {
    title: String,
    body: String,
    creator_name: String,
    creator_email: String,
}

impl From<BlogWithCreatorRow> for ShowBlog {
    fn from(row: BlogWithCreatorRow) -> Self {
        ShowBlog {
            title: row.title,
            body: row.body,
            creator: UserPublic {
                name: row.creator_name,
                email: row.creator_email,
            },
        }
    }
}

/// Blog repository for database operations
#[derive(Clone)]
pub struct BlogRepository {
    pool: PgPool,
}

impl BlogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All blogs with their creators inlined
    pub async fn list_with_creators(&self) -> Result<Vec<ShowBlog>, sqlx::Error> {
        let rows = sqlx::query_as::<_, BlogWithCreatorRow>(
            "SELECT b.title, b.body, u.name AS creator_name, u.email AS creator_email \
             FROM blogs b JOIN users u ON u.id = b.user_id \
             ORDER BY b.id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ShowBlog::from).collect())
    }

    /// A single blog with its creator, if it exists
    pub async fn find_with_creator(&self, id: i32) -> Result<Option<ShowBlog>, sqlx::Error> {
        let row = sqlx::query_as::<_, BlogWithCreatorRow>(
            "SELECT b.title, b.body, u.name AS creator_name, u.email AS creator_email \
             FROM blogs b JOIN users u ON u.id = b.user_id \
             WHERE b.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ShowBlog::from))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Blog>, sqlx::Error> {
        sqlx::query_as::<_, Blog>("SELECT id, title, body, user_id FROM blogs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Compact list of one user's blogs
    pub async fn find_by_user(&self, user_id: i32) -> Result<Vec<BlogSummary>, sqlx::Error> {
        sqlx::query_as::<_, BlogSummary>(
            "SELECT title, body FROM blogs WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Insert a new blog attributed to `user_id`
    pub async fn create(&self, user_id: i32, title: &str, body: &str) -> Result<Blog, sqlx::Error> {
        sqlx::query_as::<_, Blog>(
            "INSERT INTO blogs (title, body, user_id) VALUES ($1, $2, $3) \
             RETURNING id, title, body, user_id",
        )
        .bind(title)
        .bind(body)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn update(&self, id: i32, title: &str, body: &str) -> Result<Blog, sqlx::Error> {
        sqlx::query_as::<_, Blog>(
            "UPDATE blogs SET title = $1, body = $2 WHERE id = $3 \
             RETURNING id, title, body, user_id",
        )
        .bind(title)
        .bind(body)
        .bind(id)
        .fetch_one(&self.pool)
        .await
    }

    /// Delete a blog; returns the number of rows removed
    pub async fn delete(&self, id: i32) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
