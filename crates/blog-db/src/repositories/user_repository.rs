use crate::{DbError, Result as DbErrorResult};

use blog_core::User;

use std::panic::Location;

use chrono::DateTime;
use error_location::ErrorLocation;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<User>> {
        let row = sqlx::query("SELECT id, username, email, created_at FROM users WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| map_user(&r)).transpose()
    }

    pub async fn find_by_username(&self, username: &str) -> DbErrorResult<Option<User>> {
        let row =
            sqlx::query("SELECT id, username, email, created_at FROM users WHERE username = ?")
                .bind(username)
                .fetch_optional(&self.pool)
                .await?;

        row.map(|r| map_user(&r)).transpose()
    }

    /// Resolve the user for `username`, creating it on first sight.
    ///
    /// Two-step contract: lookup, then insert on miss. A unique-constraint
    /// failure on the insert means another request won the create race, so
    /// the row is re-fetched and treated as found. A non-empty `email` that
    /// differs from the stored one is persisted.
    pub async fn upsert_by_username(&self, username: &str, email: &str) -> DbErrorResult<User> {
        if let Some(user) = self.find_by_username(username).await? {
            return self.refresh_email(user, email).await;
        }

        let user = User::new(username.to_string(), email.to_string());
        match self.insert(&user).await {
            Ok(()) => Ok(user),
            Err(e) if e.is_unique_violation() => {
                let existing = self.find_by_username(username).await?.ok_or_else(|| {
                    DbError::CorruptRow {
                        message: format!("user '{}' vanished after insert conflict", username),
                        location: ErrorLocation::from(Location::caller()),
                    }
                })?;
                self.refresh_email(existing, email).await
            }
            Err(e) => Err(e),
        }
    }

    async fn insert(&self, user: &User) -> DbErrorResult<()> {
        sqlx::query("INSERT INTO users (id, username, email, created_at) VALUES (?, ?, ?, ?)")
            .bind(user.id.to_string())
            .bind(&user.username)
            .bind(&user.email)
            .bind(user.created_at.timestamp())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn refresh_email(&self, mut user: User, email: &str) -> DbErrorResult<User> {
        if email.is_empty() || user.email == email {
            return Ok(user);
        }

        sqlx::query("UPDATE users SET email = ? WHERE id = ?")
            .bind(email)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await?;

        user.email = email.to_string();
        Ok(user)
    }
}

#[track_caller]
fn map_user(row: &SqliteRow) -> DbErrorResult<User> {
    let id: String = row.try_get("id")?;
    let created_at: i64 = row.try_get("created_at")?;

    Ok(User {
        id: Uuid::parse_str(&id).map_err(|e| DbError::CorruptRow {
            message: format!("invalid UUID in users.id: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        created_at: DateTime::from_timestamp(created_at, 0).ok_or_else(|| DbError::CorruptRow {
            message: format!("invalid timestamp in users.created_at: {}", created_at),
            location: ErrorLocation::from(Location::caller()),
        })?,
    })
}
