use serde::Deserialize;

/// Query parameters for the public post listing
#[derive(Debug, Default, Deserialize)]
pub struct ListPostsQuery {
    /// 1-based page number
    pub page: Option<u32>,
    /// Capped at the configured maximum
    pub page_size: Option<u32>,
    /// Case-insensitive substring over title, content, and tag names
    pub q: Option<String>,
    /// Restrict to posts carrying this tag slug
    pub tag: Option<String>,
}
