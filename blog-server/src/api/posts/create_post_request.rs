use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    /// Derived from the title when omitted
    pub slug: Option<String>,
    pub content: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    /// "draft" (default) or "published"
    pub status: Option<String>,
    /// Tag slugs to attach; unknown slugs are ignored
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}
