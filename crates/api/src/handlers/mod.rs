pub mod applications;
pub mod me;
pub mod projects;
