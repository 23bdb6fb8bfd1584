pub mod error;
pub mod models;
pub mod slug;

pub use error::{CoreError, Result};
pub use error_location::ErrorLocation;
pub use models::comment::Comment;
pub use models::post::Post;
pub use models::post_status::PostStatus;
pub use models::profile::Profile;
pub use models::tag::Tag;
pub use models::user::User;
pub use slug::slugify;

#[cfg(test)]
mod tests;
