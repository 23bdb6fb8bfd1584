use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateTagRequest {
    pub name: String,
    /// Derived from the name when omitted
    pub slug: Option<String>,
}
