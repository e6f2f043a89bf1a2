//! Ordered draft validation
//!
//! Rules run in a fixed order and stop at the first failure; only that
//! failure is surfaced to the user. The order must not change, since the
//! form shows exactly one reason per failed submit.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

use crate::domain::job::{JobDraft, JobMode};

/// First failing rule for a draft, one variant per rule. `Display` carries
/// the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("Please enter a job location.")]
    LocationRequired,

    #[error("Please enter a job title.")]
    TitleRequired,

    #[error("Please select a freelancer type.")]
    FreelancerTypeRequired,

    #[error("Please select a job type.")]
    ModeRequired,

    #[error("Deadline must be a future date.")]
    DeadlineNotInFuture,

    #[error("Please enter a valid budget.")]
    BudgetInvalid,

    #[error("Please enter all required skills.")]
    SkillsIncomplete,

    #[error("Please enter a job description.")]
    DescriptionRequired,

    #[error("Please upload at least one portfolio image.")]
    AttachmentsRequired,
}

impl ValidationFailure {
    /// Stable code for callers that need programmatic handling instead of
    /// parsing the message text.
    pub fn code(&self) -> &'static str {
        match self {
            Self::LocationRequired => "LOCATION_REQUIRED",
            Self::TitleRequired => "TITLE_REQUIRED",
            Self::FreelancerTypeRequired => "FREELANCER_TYPE_REQUIRED",
            Self::ModeRequired => "MODE_REQUIRED",
            Self::DeadlineNotInFuture => "DEADLINE_NOT_IN_FUTURE",
            Self::BudgetInvalid => "BUDGET_INVALID",
            Self::SkillsIncomplete => "SKILLS_INCOMPLETE",
            Self::DescriptionRequired => "DESCRIPTION_REQUIRED",
            Self::AttachmentsRequired => "ATTACHMENTS_REQUIRED",
        }
    }
}

/// Runs the ordered rule list against `draft` as of `now`.
///
/// Pure function of its inputs: re-running it on an unchanged draft yields
/// the same result and the same first failure.
pub fn validate(draft: &JobDraft, now: DateTime<Utc>) -> Result<(), ValidationFailure> {
    // 1. On-site jobs need a user-entered location.
    if draft.mode == JobMode::OnSite && draft.location_text.is_empty() {
        return Err(ValidationFailure::LocationRequired);
    }

    // 2.
    if draft.title.is_empty() {
        return Err(ValidationFailure::TitleRequired);
    }

    // 3.
    if draft.freelancer_type.is_empty() {
        return Err(ValidationFailure::FreelancerTypeRequired);
    }

    // 4. Mode is a non-optional enum so this rule can no longer fail; the
    //    slot stays to keep the historical rule order intact.

    // 5. Strictly in the future.
    if draft.deadline <= now {
        return Err(ValidationFailure::DeadlineNotInFuture);
    }

    // 6. The form feeds text; it must parse as a positive decimal.
    match Decimal::from_str(draft.budget.trim()) {
        Ok(budget) if budget > Decimal::ZERO => {}
        _ => return Err(ValidationFailure::BudgetInvalid),
    }

    // 7. At least one skill, none left blank.
    if draft.skills.is_empty() || draft.skills.iter().any(|skill| skill.is_empty()) {
        return Err(ValidationFailure::SkillsIncomplete);
    }

    // 8.
    if draft.description.is_empty() {
        return Err(ValidationFailure::DescriptionRequired);
    }

    // 9.
    if draft.attachments.is_empty() {
        return Err(ValidationFailure::AttachmentsRequired);
    }

    Ok(())
}
