//! HTTP handlers, grouped by resource.

pub mod articles;
pub mod review;
pub mod settings;
pub mod versions;
