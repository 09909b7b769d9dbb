//! Domain core for crewhub's project recruitment.
//!
//! Everything in this crate is storage- and transport-agnostic: the
//! application state machine, the capacity ledger, the project status
//! deriver, and the [`recruitment::RecruitmentService`] that orchestrates
//! them over a [`recruitment::RecruitmentStore`].

pub mod application;
pub mod capacity;
pub mod clock;
pub mod error;
pub mod pagination;
pub mod project_status;
pub mod recruitment;
pub mod roles;
pub mod types;
