use crate::{DbError, Result as DbErrorResult};

use blog_core::Comment;

use std::panic::Location;

use chrono::DateTime;
use error_location::ErrorLocation;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

#[derive(Clone)]
pub struct CommentRepository {
    pool: SqlitePool,
}

impl CommentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, comment: &Comment) -> DbErrorResult<()> {
        sqlx::query(
            r#"
              INSERT INTO comments (id, post_id, author_id, content, created_at, approved)
              VALUES (?, ?, ?, ?, ?, ?)
              "#,
        )
        .bind(comment.id.to_string())
        .bind(comment.post_id.to_string())
        .bind(comment.author_id.map(|id| id.to_string()))
        .bind(&comment.content)
        .bind(comment.created_at.timestamp())
        .bind(comment.approved)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<Comment>> {
        let row = sqlx::query(
            r#"
              SELECT id, post_id, author_id, content, created_at, approved
              FROM comments
              WHERE id = ?
              "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| map_comment(&r)).transpose()
    }

    /// Approved comments for a post, oldest first.
    pub async fn find_approved_by_post(&self, post_id: Uuid) -> DbErrorResult<Vec<Comment>> {
        let rows = sqlx::query(
            r#"
              SELECT id, post_id, author_id, content, created_at, approved
              FROM comments
              WHERE post_id = ? AND approved = 1
              ORDER BY created_at ASC
              "#,
        )
        .bind(post_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(map_comment)
            .collect::<DbErrorResult<Vec<_>>>()
    }

    pub async fn delete(&self, id: Uuid) -> DbErrorResult<()> {
        sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[track_caller]
fn map_comment(row: &SqliteRow) -> DbErrorResult<Comment> {
    let id: String = row.try_get("id")?;
    let post_id: String = row.try_get("post_id")?;
    let author_id: Option<String> = row.try_get("author_id")?;
    let created_at: i64 = row.try_get("created_at")?;

    Ok(Comment {
        id: Uuid::parse_str(&id).map_err(|e| DbError::CorruptRow {
            message: format!("invalid UUID in comments.id: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?,
        post_id: Uuid::parse_str(&post_id).map_err(|e| DbError::CorruptRow {
            message: format!("invalid UUID in comments.post_id: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?,
        author_id: author_id.as_deref().and_then(|s| Uuid::parse_str(s).ok()),
        content: row.try_get("content")?,
        created_at: DateTime::from_timestamp(created_at, 0).ok_or_else(|| DbError::CorruptRow {
            message: format!("invalid timestamp in comments.created_at: {}", created_at),
            location: ErrorLocation::from(Location::caller()),
        })?,
        approved: row.try_get("approved")?,
    })
}
