pub mod error;
pub mod repositories;

pub use error::{DbError, Result};
pub use repositories::comment_repository::CommentRepository;
pub use repositories::post_repository::{PostListFilter, PostPage, PostRepository};
pub use repositories::profile_repository::ProfileRepository;
pub use repositories::tag_repository::TagRepository;
pub use repositories::user_repository::UserRepository;

/// Embedded migrations, applied by the server at startup and by tests
/// against in-memory databases.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
