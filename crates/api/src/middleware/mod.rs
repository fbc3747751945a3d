pub mod auth;
pub mod gates;
