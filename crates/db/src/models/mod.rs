//! Row structs for the recruitment tables.
//!
//! Statuses are stored as `TEXT`; each row converts into its domain record
//! with `TryFrom`, and an unknown status is reported as a data-integrity
//! error.

pub mod application;
pub mod project;
pub mod user;
