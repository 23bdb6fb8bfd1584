use crate::{DbError, Result as DbErrorResult};

use blog_core::{Post, PostStatus, Tag};

use std::panic::Location;
use std::str::FromStr;

use chrono::DateTime;
use error_location::ErrorLocation;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use uuid::Uuid;

/// Filters for the public post listing. `query` is matched as a
/// case-insensitive substring of title, content, or an attached tag name.
#[derive(Debug, Default, Clone)]
pub struct PostListFilter {
    pub query: Option<String>,
    pub tag_slug: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

pub struct PostPage {
    pub posts: Vec<Post>,
    pub total: i64,
}

#[derive(Clone)]
pub struct PostRepository {
    pool: SqlitePool,
}

impl PostRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, post: &Post) -> DbErrorResult<()> {
        sqlx::query(
            r#"
              INSERT INTO posts (
                  id, author_id, title, slug, content, excerpt, status,
                  published_at, created_at, updated_at, click_count
              ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
              "#,
        )
        .bind(post.id.to_string())
        .bind(post.author_id.to_string())
        .bind(&post.title)
        .bind(&post.slug)
        .bind(&post.content)
        .bind(&post.excerpt)
        .bind(post.status.as_str())
        .bind(post.published_at.map(|dt| dt.timestamp()))
        .bind(post.created_at.timestamp())
        .bind(post.updated_at.timestamp())
        .bind(post.click_count)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_slug(&self, slug: &str) -> DbErrorResult<Option<Post>> {
        let row = sqlx::query(&format!("{} WHERE slug = ?", SELECT_POST))
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| map_post(&r)).transpose()
    }

    pub async fn find_published_by_slug(&self, slug: &str) -> DbErrorResult<Option<Post>> {
        let row = sqlx::query(&format!(
            "{} WHERE slug = ? AND status = 'published'",
            SELECT_POST
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| map_post(&r)).transpose()
    }

    pub async fn slug_exists(&self, slug: &str) -> DbErrorResult<bool> {
        let row = sqlx::query("SELECT 1 FROM posts WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }

    /// Published posts, newest first, with the filter's pagination window.
    pub async fn list_published(&self, filter: &PostListFilter) -> DbErrorResult<PostPage> {
        let mut query = QueryBuilder::<Sqlite>::new(format!(
            "{} WHERE status = 'published'",
            SELECT_POST
        ));
        push_filters(&mut query, filter);
        query.push(" ORDER BY published_at DESC LIMIT ");
        query.push_bind(filter.limit);
        query.push(" OFFSET ");
        query.push_bind(filter.offset);

        let rows = query.build().fetch_all(&self.pool).await?;
        let posts = rows
            .iter()
            .map(map_post)
            .collect::<DbErrorResult<Vec<_>>>()?;

        let mut count = QueryBuilder::<Sqlite>::new(
            "SELECT COUNT(*) AS total FROM posts WHERE status = 'published'",
        );
        push_filters(&mut count, filter);
        let total: i64 = count.build().fetch_one(&self.pool).await?.try_get("total")?;

        Ok(PostPage { posts, total })
    }

    pub async fn update(&self, post: &Post) -> DbErrorResult<()> {
        sqlx::query(
            r#"
              UPDATE posts
              SET title = ?, slug = ?, content = ?, excerpt = ?, status = ?,
                  published_at = ?, updated_at = ?
              WHERE id = ?
              "#,
        )
        .bind(&post.title)
        .bind(&post.slug)
        .bind(&post.content)
        .bind(&post.excerpt)
        .bind(post.status.as_str())
        .bind(post.published_at.map(|dt| dt.timestamp()))
        .bind(post.updated_at.timestamp())
        .bind(post.id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> DbErrorResult<()> {
        sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Bump the view counter without touching `updated_at`.
    pub async fn increment_click_count(&self, id: Uuid) -> DbErrorResult<()> {
        sqlx::query("UPDATE posts SET click_count = click_count + 1 WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn tags_for_post(&self, post_id: Uuid) -> DbErrorResult<Vec<Tag>> {
        let rows = sqlx::query(
            r#"
              SELECT t.id, t.name, t.slug, t.created_at
              FROM tags t
              JOIN post_tags pt ON pt.tag_id = t.id
              WHERE pt.post_id = ?
              ORDER BY t.name ASC
              "#,
        )
        .bind(post_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(super::tag_repository::map_tag)
            .collect::<DbErrorResult<Vec<_>>>()
    }

    /// Replace the post's tag set.
    pub async fn set_tags(&self, post_id: Uuid, tag_ids: &[Uuid]) -> DbErrorResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM post_tags WHERE post_id = ?")
            .bind(post_id.to_string())
            .execute(&mut *tx)
            .await?;

        for tag_id in tag_ids {
            sqlx::query("INSERT INTO post_tags (post_id, tag_id) VALUES (?, ?)")
                .bind(post_id.to_string())
                .bind(tag_id.to_string())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

const SELECT_POST: &str = r#"
    SELECT id, author_id, title, slug, content, excerpt, status,
           published_at, created_at, updated_at, click_count
    FROM posts
"#;

fn push_filters(query: &mut QueryBuilder<'_, Sqlite>, filter: &PostListFilter) {
    if let Some(q) = filter.query.as_deref().filter(|q| !q.is_empty()) {
        let pattern = format!("%{}%", q);
        query.push(" AND (title LIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR content LIKE ");
        query.push_bind(pattern.clone());
        query.push(
            " OR EXISTS (SELECT 1 FROM post_tags pt JOIN tags t ON t.id = pt.tag_id \
             WHERE pt.post_id = posts.id AND t.name LIKE ",
        );
        query.push_bind(pattern);
        query.push("))");
    }

    if let Some(tag_slug) = filter.tag_slug.as_deref().filter(|t| !t.is_empty()) {
        query.push(
            " AND EXISTS (SELECT 1 FROM post_tags pt JOIN tags t ON t.id = pt.tag_id \
             WHERE pt.post_id = posts.id AND t.slug = ",
        );
        query.push_bind(tag_slug.to_string());
        query.push(")");
    }
}

#[track_caller]
fn map_post(row: &SqliteRow) -> DbErrorResult<Post> {
    let id: String = row.try_get("id")?;
    let author_id: String = row.try_get("author_id")?;
    let status: String = row.try_get("status")?;
    let published_at: Option<i64> = row.try_get("published_at")?;
    let created_at: i64 = row.try_get("created_at")?;
    let updated_at: i64 = row.try_get("updated_at")?;

    Ok(Post {
        id: Uuid::parse_str(&id).map_err(|e| DbError::CorruptRow {
            message: format!("invalid UUID in posts.id: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?,
        author_id: Uuid::parse_str(&author_id).map_err(|e| DbError::CorruptRow {
            message: format!("invalid UUID in posts.author_id: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?,
        title: row.try_get("title")?,
        slug: row.try_get("slug")?,
        content: row.try_get("content")?,
        excerpt: row.try_get("excerpt")?,
        status: PostStatus::from_str(&status).map_err(|e| DbError::CorruptRow {
            message: format!("invalid status in posts.status: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?,
        published_at: published_at.and_then(|ts| DateTime::from_timestamp(ts, 0)),
        created_at: DateTime::from_timestamp(created_at, 0).ok_or_else(|| DbError::CorruptRow {
            message: format!("invalid timestamp in posts.created_at: {}", created_at),
            location: ErrorLocation::from(Location::caller()),
        })?,
        updated_at: DateTime::from_timestamp(updated_at, 0).ok_or_else(|| DbError::CorruptRow {
            message: format!("invalid timestamp in posts.updated_at: {}", updated_at),
            location: ErrorLocation::from(Location::caller()),
        })?,
        click_count: row.try_get("click_count")?,
    })
}
