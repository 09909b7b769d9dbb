//! Authentication primitives.
//!
//! - [`jwt`] -- HS256 access-token validation (and minting, for tooling and tests).
//!
//! Users sign in through the external identity service; this server only
//! verifies the tokens it issues.

pub mod jwt;
