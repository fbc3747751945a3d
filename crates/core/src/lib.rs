//! Masthead core domain logic.
//!
//! Everything in this crate is storage- and transport-agnostic: the article
//! editorial state machine, slug generation, the author-reveal countdown,
//! the settings gates, and the [`editorial::EditorialService`] orchestration
//! that ties them together over the [`store::EditorialStore`] trait.
//!
//! The HTTP layer lives in `masthead-api`; the Postgres implementation of
//! the store trait lives in `masthead-db`.

pub mod article;
pub mod countdown;
pub mod editorial;
pub mod error;
pub mod notify;
pub mod reveal;
pub mod roles;
pub mod settings;
pub mod slug;
pub mod status;
pub mod store;
pub mod types;
pub mod workflow;
