//! Row types mapped by `sqlx::query_as` and their conversions into the
//! core domain entities.

pub mod article;
pub mod settings;
pub mod user;

pub use article::{ArticleRow, VersionRow};
pub use settings::SettingsRow;
pub use user::UserRow;
