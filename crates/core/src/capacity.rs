//! Capacity ledger: accepted-member counts and remaining team slots.
//!
//! Pure functions over already-loaded numbers. A negative remainder means the
//! stored data is corrupt and is reported as [`CoreError::DataIntegrity`],
//! never clamped.

use serde::Serialize;

use crate::application::ApplicationStatus;
use crate::error::CoreError;
use crate::types::DbId;

/// Per-status application counts for one project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ApplicationCounts {
    pub pending: i64,
    pub accepted: i64,
    pub rejected: i64,
    pub withdrawn: i64,
}

impl ApplicationCounts {
    /// Tally a sequence of statuses.
    pub fn tally<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = ApplicationStatus>,
    {
        let mut counts = Self::default();
        for status in statuses {
            counts.record(status, 1);
        }
        counts
    }

    /// Add `n` applications with `status` to the tally.
    pub fn record(&mut self, status: ApplicationStatus, n: i64) {
        match status {
            ApplicationStatus::Pending => self.pending += n,
            ApplicationStatus::Accepted => self.accepted += n,
            ApplicationStatus::Rejected => self.rejected += n,
            ApplicationStatus::Withdrawn => self.withdrawn += n,
        }
    }

    pub fn total(&self) -> i64 {
        self.pending + self.accepted + self.rejected + self.withdrawn
    }
}

/// Slots still open on a team of `team_size` with `accepted` members.
pub fn remaining_slots(project_id: DbId, team_size: i32, accepted: i64) -> Result<i64, CoreError> {
    let remaining = i64::from(team_size) - accepted;
    if remaining < 0 {
        return Err(CoreError::DataIntegrity(format!(
            "Project {project_id} has {accepted} accepted members but a team size of {team_size}"
        )));
    }
    Ok(remaining)
}

/// Whether the team has no open slot left.
pub fn is_full(team_size: i32, accepted: i64) -> bool {
    accepted >= i64::from(team_size)
}

/// Check the denormalized `current_members` counter against a fresh recount.
pub fn verify_member_counter(
    project_id: DbId,
    current_members: i32,
    accepted: i64,
) -> Result<(), CoreError> {
    if i64::from(current_members) != accepted {
        return Err(CoreError::DataIntegrity(format!(
            "Project {project_id} stores current_members = {current_members} \
             but has {accepted} accepted applications"
        )));
    }
    Ok(())
}
