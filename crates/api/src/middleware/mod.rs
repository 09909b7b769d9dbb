//! Request extractors for authentication.
//!
//! - [`auth::AuthUser`] -- Extracts the acting user from a JWT Bearer token.

pub mod auth;
