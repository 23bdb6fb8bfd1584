//! Post entity - the unit of publication.

use crate::PostStatus;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    /// Unique URL identifier, derived from the title when not supplied.
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub status: PostStatus,
    /// Stamped the first time the post transitions to published.
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub click_count: i64,
}

impl Post {
    pub fn new(
        author_id: Uuid,
        title: String,
        slug: String,
        content: String,
        excerpt: String,
        status: PostStatus,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            title,
            slug,
            content,
            excerpt,
            status,
            published_at: (status == PostStatus::Published).then_some(now),
            created_at: now,
            updated_at: now,
            click_count: 0,
        }
    }

    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }

    /// Transition to published, stamping `published_at` only once.
    pub fn publish(&mut self) {
        self.status = PostStatus::Published;
        if self.published_at.is_none() {
            self.published_at = Some(Utc::now());
        }
    }
}
