use crate::{DbError, Result as DbErrorResult};

use blog_core::Tag;

use std::panic::Location;

use chrono::DateTime;
use error_location::ErrorLocation;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

#[derive(Clone)]
pub struct TagRepository {
    pool: SqlitePool,
}

impl TagRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, tag: &Tag) -> DbErrorResult<()> {
        sqlx::query("INSERT INTO tags (id, name, slug, created_at) VALUES (?, ?, ?, ?)")
            .bind(tag.id.to_string())
            .bind(&tag.name)
            .bind(&tag.slug)
            .bind(tag.created_at.timestamp())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn find_by_slug(&self, slug: &str) -> DbErrorResult<Option<Tag>> {
        let row = sqlx::query("SELECT id, name, slug, created_at FROM tags WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| map_tag(&r)).transpose()
    }

    pub async fn list_all(&self) -> DbErrorResult<Vec<Tag>> {
        let rows = sqlx::query("SELECT id, name, slug, created_at FROM tags ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(map_tag).collect::<DbErrorResult<Vec<_>>>()
    }

    /// Tags matching a list of slugs; unknown slugs are skipped.
    pub async fn find_by_slugs(&self, slugs: &[String]) -> DbErrorResult<Vec<Tag>> {
        let mut tags = Vec::with_capacity(slugs.len());
        for slug in slugs {
            if let Some(tag) = self.find_by_slug(slug).await? {
                tags.push(tag);
            }
        }
        Ok(tags)
    }

    pub async fn delete(&self, id: Uuid) -> DbErrorResult<()> {
        sqlx::query("DELETE FROM tags WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[track_caller]
pub(crate) fn map_tag(row: &SqliteRow) -> DbErrorResult<Tag> {
    let id: String = row.try_get("id")?;
    let created_at: i64 = row.try_get("created_at")?;

    Ok(Tag {
        id: Uuid::parse_str(&id).map_err(|e| DbError::CorruptRow {
            message: format!("invalid UUID in tags.id: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?,
        name: row.try_get("name")?,
        slug: row.try_get("slug")?,
        created_at: DateTime::from_timestamp(created_at, 0).ok_or_else(|| DbError::CorruptRow {
            message: format!("invalid timestamp in tags.created_at: {}", created_at),
            location: ErrorLocation::from(Location::caller()),
        })?,
    })
}
