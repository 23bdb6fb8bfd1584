use serde::Deserialize;

/// Partial update: absent fields keep their stored values
#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub status: Option<String>,
    pub tags: Option<Vec<String>>,
}
