//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod article_repo;
pub mod settings_repo;
pub mod user_repo;
pub mod version_repo;

pub use article_repo::ArticleRepo;
pub use settings_repo::SettingsRepo;
pub use user_repo::UserRepo;
pub use version_repo::VersionRepo;
