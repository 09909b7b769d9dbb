//! Application status state machine, review input and payload validation.
//!
//! Transition rules:
//! - `pending`  -> `accepted`, `rejected` (reviewer), `withdrawn` (applicant)
//! - `accepted` -> `withdrawn` (applicant)
//! - `rejected` -> `withdrawn` (applicant)
//! - `withdrawn` is terminal
//!
//! Who may take an edge is enforced by the recruitment service; this module
//! only knows which edges exist.

use serde::{Deserialize, Serialize};
use validator::ValidateUrl;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length (characters) of any free-text payload field.
pub const MAX_PAYLOAD_TEXT_LENGTH: usize = 5_000;

/// Maximum length (characters) of a URL payload field.
pub const MAX_URL_LENGTH: usize = 2_048;

/// Maximum length (characters) of review notes and rejection reasons.
pub const MAX_REVIEW_TEXT_LENGTH: usize = 2_000;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle status of a single application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [ApplicationStatus; 4] = [
        Self::Pending,
        Self::Accepted,
        Self::Rejected,
        Self::Withdrawn,
    ];

    /// Return the string stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Withdrawn => "withdrawn",
        }
    }

    /// Parse from the database / wire representation.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            "withdrawn" => Ok(Self::Withdrawn),
            other => Err(CoreError::Validation(format!(
                "Unknown application status '{other}'"
            ))),
        }
    }

    /// An open application blocks the applicant from applying to the same
    /// project again. Only withdrawal closes it.
    pub fn is_open(self) -> bool {
        self != Self::Withdrawn
    }

    /// No edge leaves a terminal status.
    pub fn is_terminal(self) -> bool {
        valid_transitions(self).is_empty()
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the statuses `from` may move to.
pub fn valid_transitions(from: ApplicationStatus) -> &'static [ApplicationStatus] {
    use ApplicationStatus::*;
    match from {
        Pending => &[Accepted, Rejected, Withdrawn],
        Accepted => &[Withdrawn],
        Rejected => &[Withdrawn],
        Withdrawn => &[],
    }
}

/// Validate that `from -> to` is an edge of the application lifecycle.
pub fn validate_transition(
    from: ApplicationStatus,
    to: ApplicationStatus,
) -> Result<(), CoreError> {
    if valid_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err(invalid_transition(from, to))
    }
}

/// Build the error for a rejected `from -> to` edge.
pub fn invalid_transition(from: ApplicationStatus, to: ApplicationStatus) -> CoreError {
    CoreError::InvalidTransition {
        entity: "application",
        from: from.to_string(),
        to: to.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Review input
// ---------------------------------------------------------------------------

/// Reviewer verdict on a pending application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    Accept,
    Reject,
}

impl ReviewDecision {
    /// The status an application lands in after this decision.
    pub fn target_status(self) -> ApplicationStatus {
        match self {
            Self::Accept => ApplicationStatus::Accepted,
            Self::Reject => ApplicationStatus::Rejected,
        }
    }
}

/// A reviewer's decision plus optional notes.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewApplication {
    pub decision: ReviewDecision,
    pub review_notes: Option<String>,
    pub rejection_reason: Option<String>,
}

impl ReviewApplication {
    pub fn accept(review_notes: Option<String>) -> Self {
        Self {
            decision: ReviewDecision::Accept,
            review_notes,
            rejection_reason: None,
        }
    }

    pub fn reject(rejection_reason: Option<String>, review_notes: Option<String>) -> Self {
        Self {
            decision: ReviewDecision::Reject,
            review_notes,
            rejection_reason,
        }
    }
}

/// Validate a review before anything is written.
///
/// A rejection must carry a non-blank `rejection_reason` or `review_notes`.
pub fn validate_review(review: &ReviewApplication) -> Result<(), CoreError> {
    validate_optional_text(&review.review_notes, "review_notes", MAX_REVIEW_TEXT_LENGTH)?;
    validate_optional_text(
        &review.rejection_reason,
        "rejection_reason",
        MAX_REVIEW_TEXT_LENGTH,
    )?;

    if review.decision == ReviewDecision::Reject
        && is_blank(&review.rejection_reason)
        && is_blank(&review.review_notes)
    {
        return Err(CoreError::Validation(
            "A rejection must include a rejection_reason or review_notes".to_string(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// Free-text answers submitted with an application. Opaque to the lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationPayload {
    pub motivation: String,
    pub relevant_experience: Option<String>,
    pub available_time: Option<String>,
    pub portfolio_url: Option<String>,
    pub github_url: Option<String>,
    pub additional_info: Option<String>,
}

impl ApplicationPayload {
    /// Trim every field and turn blank optional fields into `None`.
    pub fn normalized(self) -> Self {
        Self {
            motivation: self.motivation.trim().to_string(),
            relevant_experience: normalize_optional(self.relevant_experience),
            available_time: normalize_optional(self.available_time),
            portfolio_url: normalize_optional(self.portfolio_url),
            github_url: normalize_optional(self.github_url),
            additional_info: normalize_optional(self.additional_info),
        }
    }
}

/// Validate a (normalized) application payload.
pub fn validate_payload(payload: &ApplicationPayload) -> Result<(), CoreError> {
    if payload.motivation.trim().is_empty() {
        return Err(CoreError::Validation(
            "motivation must not be empty".to_string(),
        ));
    }
    validate_text(&payload.motivation, "motivation", MAX_PAYLOAD_TEXT_LENGTH)?;
    validate_optional_text(
        &payload.relevant_experience,
        "relevant_experience",
        MAX_PAYLOAD_TEXT_LENGTH,
    )?;
    validate_optional_text(
        &payload.available_time,
        "available_time",
        MAX_PAYLOAD_TEXT_LENGTH,
    )?;
    validate_optional_text(
        &payload.additional_info,
        "additional_info",
        MAX_PAYLOAD_TEXT_LENGTH,
    )?;
    validate_optional_url(&payload.portfolio_url, "portfolio_url")?;
    validate_optional_url(&payload.github_url, "github_url")?;
    Ok(())
}

fn validate_optional_url(value: &Option<String>, field: &str) -> Result<(), CoreError> {
    let Some(url) = value else {
        return Ok(());
    };
    validate_text(url, field, MAX_URL_LENGTH)?;
    let has_web_scheme = url.starts_with("http://") || url.starts_with("https://");
    if !has_web_scheme || !url.validate_url() {
        return Err(CoreError::Validation(format!(
            "{field} must be an absolute http(s) URL"
        )));
    }
    Ok(())
}

fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max: usize,
) -> Result<(), CoreError> {
    match value {
        Some(text) => validate_text(text, field, max),
        None => Ok(()),
    }
}

fn validate_text(value: &str, field: &str, max: usize) -> Result<(), CoreError> {
    let len = value.chars().count();
    if len > max {
        return Err(CoreError::Validation(format!(
            "{field} exceeds maximum length of {max} characters (got {len})"
        )));
    }
    Ok(())
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use ApplicationStatus::*;

    fn payload() -> ApplicationPayload {
        ApplicationPayload {
            motivation: "I build compilers for fun".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn status_round_trips_through_name() {
        for status in ApplicationStatus::ALL {
            assert_eq!(ApplicationStatus::from_name(status.as_str()).unwrap(), status);
        }
        assert!(ApplicationStatus::from_name("approved").is_err());
    }

    #[test]
    fn exhaustive_transition_table() {
        let allowed = [
            (Pending, Accepted),
            (Pending, Rejected),
            (Pending, Withdrawn),
            (Accepted, Withdrawn),
            (Rejected, Withdrawn),
        ];
        for from in ApplicationStatus::ALL {
            for to in ApplicationStatus::ALL {
                let result = validate_transition(from, to);
                if allowed.contains(&(from, to)) {
                    assert!(result.is_ok(), "{from} -> {to} should be allowed");
                } else {
                    assert_matches!(
                        result,
                        Err(CoreError::InvalidTransition { entity: "application", from: f, to: t })
                            if f == from.as_str() && t == to.as_str()
                    );
                }
            }
        }
    }

    #[test]
    fn only_withdrawn_is_terminal() {
        assert!(Withdrawn.is_terminal());
        assert!(!Pending.is_terminal());
        assert!(!Accepted.is_terminal());
        assert!(!Rejected.is_terminal());
    }

    #[test]
    fn only_withdrawn_is_closed() {
        assert!(!Withdrawn.is_open());
        assert!(Pending.is_open() && Accepted.is_open() && Rejected.is_open());
    }

    #[test]
    fn accept_without_notes_is_valid() {
        assert!(validate_review(&ReviewApplication::accept(None)).is_ok());
    }

    #[test]
    fn reject_requires_reason_or_notes() {
        assert_matches!(
            validate_review(&ReviewApplication::reject(None, None)),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            validate_review(&ReviewApplication::reject(Some("   ".into()), Some("".into()))),
            Err(CoreError::Validation(_))
        );
        assert!(validate_review(&ReviewApplication::reject(Some("Team is set".into()), None)).is_ok());
        assert!(validate_review(&ReviewApplication::reject(None, Some("Not a fit".into()))).is_ok());
    }

    #[test]
    fn review_notes_length_is_bounded() {
        let long = "x".repeat(MAX_REVIEW_TEXT_LENGTH + 1);
        assert!(validate_review(&ReviewApplication::accept(Some(long))).is_err());
    }

    #[test]
    fn decision_targets() {
        assert_eq!(ReviewDecision::Accept.target_status(), Accepted);
        assert_eq!(ReviewDecision::Reject.target_status(), Rejected);
    }

    #[test]
    fn valid_payload_passes() {
        let mut p = payload();
        p.portfolio_url = Some("https://example.com/me".into());
        p.github_url = Some("http://github.com/someone".into());
        assert!(validate_payload(&p).is_ok());
    }

    #[test]
    fn blank_motivation_rejected() {
        let p = ApplicationPayload {
            motivation: "  ".into(),
            ..Default::default()
        };
        assert!(validate_payload(&p).is_err());
    }

    #[test]
    fn non_http_urls_rejected() {
        let mut p = payload();
        p.github_url = Some("ftp://github.com/someone".into());
        assert!(validate_payload(&p).is_err());

        let mut p = payload();
        p.portfolio_url = Some("not a url".into());
        assert!(validate_payload(&p).is_err());
    }

    #[test]
    fn oversized_text_rejected() {
        let mut p = payload();
        p.additional_info = Some("y".repeat(MAX_PAYLOAD_TEXT_LENGTH + 1));
        assert!(validate_payload(&p).is_err());
    }

    #[test]
    fn normalization_trims_and_drops_blanks() {
        let p = ApplicationPayload {
            motivation: "  hello ".into(),
            relevant_experience: Some("   ".into()),
            available_time: Some(" weekends ".into()),
            ..Default::default()
        }
        .normalized();
        assert_eq!(p.motivation, "hello");
        assert_eq!(p.relevant_experience, None);
        assert_eq!(p.available_time.as_deref(), Some("weekends"));
    }
}
