//! Stored project status, derived (effective) status, and the deriver.
//!
//! The stored status is what the owner set. The effective status layers
//! capacity and deadline on top of it at read time and is never persisted.

use serde::{Deserialize, Serialize};

use crate::capacity::is_full;
use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Stored status
// ---------------------------------------------------------------------------

/// Owner-controlled project status as persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Recruiting,
    #[serde(alias = "active")]
    InProgress,
    Completed,
    Cancelled,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 4] = [
        Self::Recruiting,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Recruiting => "recruiting",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parse from the database / wire representation. `active` is accepted as
    /// an alias of `in_progress`.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "recruiting" => Ok(Self::Recruiting),
            "in_progress" | "active" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(CoreError::Validation(format!(
                "Unknown project status '{other}'"
            ))),
        }
    }

    /// Completed and cancelled projects are closed by their owner for good.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate an owner-initiated change of the stored status.
///
/// - `recruiting` <-> `in_progress`
/// - any non-terminal status -> `completed` | `cancelled`
/// - terminal statuses never change
/// - staying on the same non-terminal status is a no-op
/// - reopening to `recruiting` is refused while the team is already full
pub fn validate_status_change(
    from: ProjectStatus,
    to: ProjectStatus,
    team_is_full: bool,
) -> Result<(), CoreError> {
    if from.is_terminal() {
        if from == to {
            return Ok(());
        }
        return Err(CoreError::InvalidTransition {
            entity: "project",
            from: from.to_string(),
            to: to.to_string(),
        });
    }
    if to == ProjectStatus::Recruiting && from != to && team_is_full {
        return Err(CoreError::Validation(
            "Cannot reopen recruiting: every team slot is already filled".to_string(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Effective status
// ---------------------------------------------------------------------------

/// Read-time display status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectiveStatus {
    Recruiting,
    /// Stored status is still `recruiting` but the deadline has passed.
    RecruitingClosed,
    /// Accepted members have reached the team size.
    Full,
    Active,
    Completed,
    Cancelled,
}

impl EffectiveStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Recruiting => "recruiting",
            Self::RecruitingClosed => "recruiting_closed",
            Self::Full => "full",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Display label and colour token for status badges.
    pub fn badge(self) -> StatusBadge {
        let (label, color) = match self {
            Self::Recruiting => ("Recruiting", "green"),
            Self::RecruitingClosed => ("Recruitment closed", "gray"),
            Self::Full => ("Team full", "orange"),
            Self::Active => ("In progress", "blue"),
            Self::Completed => ("Completed", "purple"),
            Self::Cancelled => ("Cancelled", "red"),
        };
        StatusBadge { label, color }
    }
}

impl std::fmt::Display for EffectiveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation lookup for an [`EffectiveStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub label: &'static str,
    pub color: &'static str,
}

/// Compute the effective status.
///
/// 1. `completed` / `cancelled` are returned unchanged.
/// 2. A full team yields `full`.
/// 3. `recruiting` past a non-null deadline yields `recruiting_closed`.
/// 4. Otherwise the stored status (`in_progress` displays as `active`).
pub fn derive_status(
    stored: ProjectStatus,
    team_size: i32,
    accepted_count: i64,
    deadline: Option<Timestamp>,
    now: Timestamp,
) -> EffectiveStatus {
    match stored {
        ProjectStatus::Completed => return EffectiveStatus::Completed,
        ProjectStatus::Cancelled => return EffectiveStatus::Cancelled,
        _ => {}
    }

    if is_full(team_size, accepted_count) {
        return EffectiveStatus::Full;
    }

    match stored {
        ProjectStatus::Recruiting if deadline.is_some_and(|d| now > d) => {
            EffectiveStatus::RecruitingClosed
        }
        ProjectStatus::Recruiting => EffectiveStatus::Recruiting,
        _ => EffectiveStatus::Active,
    }
}
