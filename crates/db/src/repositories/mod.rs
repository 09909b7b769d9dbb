//! Repository layer.
//!
//! Each repository is a zero-sized struct with async methods. Reads take
//! `&PgPool`; writes that must share a transaction take `&mut PgConnection`.

pub mod application_repo;
pub mod project_repo;
pub mod user_repo;

pub use application_repo::ApplicationRepo;
pub use project_repo::ProjectRepo;
pub use user_repo::UserRepo;
