//! Project recruitment workflow.
//!
//! [`RecruitmentService`] is the single entry point for every state change:
//! submitting, withdrawing and reviewing applications, plus the project
//! administration and read views around them. It validates and authorizes,
//! then hands each mutation to a [`RecruitmentStore`] as one conditional
//! write.

pub mod memory;
pub mod model;
pub mod review;
pub mod service;
pub mod store;
pub mod submission;
pub mod views;

#[cfg(test)]
mod test_support;

pub use memory::InMemoryRecruitmentStore;
pub use model::*;
pub use service::RecruitmentService;
pub use store::{RecruitmentStore, StoreError, WriteOutcome};
