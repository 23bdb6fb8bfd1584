use crate::{DbError, Result as DbErrorResult};

use blog_core::Profile;

use std::panic::Location;

use chrono::DateTime;
use error_location::ErrorLocation;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

#[derive(Clone)]
pub struct ProfileRepository {
    pool: SqlitePool,
}

impl ProfileRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> DbErrorResult<Option<Profile>> {
        let row = sqlx::query(
            r#"
              SELECT id, user_id, auth_id, username, email, full_name, avatar_url, created_at
              FROM profiles
              WHERE user_id = ?
              "#,
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| map_profile(&r)).transpose()
    }

    /// Create or refresh the profile projection for `user_id`.
    ///
    /// Same two-step contract as the user upsert. An existing profile gets
    /// `auth_id` pointed at the current subject; the email is only replaced
    /// by a non-empty claim.
    pub async fn upsert_for_user(
        &self,
        user_id: Uuid,
        auth_id: &str,
        username: &str,
        email: &str,
    ) -> DbErrorResult<Profile> {
        if let Some(profile) = self.find_by_user(user_id).await? {
            return self.refresh(profile, auth_id, email).await;
        }

        let profile = Profile::new(
            user_id,
            auth_id.to_string(),
            username.to_string(),
            (!email.is_empty()).then(|| email.to_string()),
        );
        match self.insert(&profile).await {
            Ok(()) => Ok(profile),
            Err(e) if e.is_unique_violation() => {
                // Lost the create race for this user; only a conflict on
                // user_id is recoverable here. Conflicts on the auth_id or
                // username columns mean the projection belongs to another
                // user and stay errors for the caller to log.
                match self.find_by_user(user_id).await? {
                    Some(existing) => self.refresh(existing, auth_id, email).await,
                    None => Err(e),
                }
            }
            Err(e) => Err(e),
        }
    }

    async fn insert(&self, profile: &Profile) -> DbErrorResult<()> {
        sqlx::query(
            r#"
              INSERT INTO profiles (id, user_id, auth_id, username, email, full_name, avatar_url, created_at)
              VALUES (?, ?, ?, ?, ?, ?, ?, ?)
              "#,
        )
        .bind(profile.id.to_string())
        .bind(profile.user_id.to_string())
        .bind(&profile.auth_id)
        .bind(&profile.username)
        .bind(&profile.email)
        .bind(&profile.full_name)
        .bind(&profile.avatar_url)
        .bind(profile.created_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn refresh(
        &self,
        mut profile: Profile,
        auth_id: &str,
        email: &str,
    ) -> DbErrorResult<Profile> {
        profile.auth_id = auth_id.to_string();
        if !email.is_empty() {
            profile.email = Some(email.to_string());
        }

        sqlx::query("UPDATE profiles SET auth_id = ?, email = ? WHERE id = ?")
            .bind(&profile.auth_id)
            .bind(&profile.email)
            .bind(profile.id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(profile)
    }
}

#[track_caller]
fn map_profile(row: &SqliteRow) -> DbErrorResult<Profile> {
    let id: String = row.try_get("id")?;
    let user_id: String = row.try_get("user_id")?;
    let created_at: i64 = row.try_get("created_at")?;

    Ok(Profile {
        id: Uuid::parse_str(&id).map_err(|e| DbError::CorruptRow {
            message: format!("invalid UUID in profiles.id: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?,
        user_id: Uuid::parse_str(&user_id).map_err(|e| DbError::CorruptRow {
            message: format!("invalid UUID in profiles.user_id: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?,
        auth_id: row.try_get("auth_id")?,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        full_name: row.try_get("full_name")?,
        avatar_url: row.try_get("avatar_url")?,
        created_at: DateTime::from_timestamp(created_at, 0).ok_or_else(|| DbError::CorruptRow {
            message: format!("invalid timestamp in profiles.created_at: {}", created_at),
            location: ErrorLocation::from(Location::caller()),
        })?,
    })
}
