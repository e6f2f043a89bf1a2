//! Job draft domain types
//!
//! The draft is the in-progress job specification owned by the capture
//! workflow; it becomes an immutable `SubmittedJob` at handoff.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::attachments::{AttachmentList, ImageRef};
use super::catalog::CatalogCategory;

/// Remote vs. on-site classification for a job posting.
///
/// The mode governs which fields are required and which catalog category
/// the freelancer-type options come from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobMode {
    #[default]
    Remote,
    OnSite,
}

impl JobMode {
    /// The other mode; the form toggle flips between exactly two states.
    pub fn toggled(self) -> Self {
        match self {
            Self::Remote => Self::OnSite,
            Self::OnSite => Self::Remote,
        }
    }

    /// Category tag used when querying the role catalog for this mode.
    pub fn category(self) -> CatalogCategory {
        match self {
            Self::Remote => CatalogCategory::FreelanceService,
            Self::OnSite => CatalogCategory::HouseholdService,
        }
    }
}

impl std::fmt::Display for JobMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Remote => write!(f, "Remote"),
            Self::OnSite => write!(f, "On-site"),
        }
    }
}

/// Geographic point produced by forward geocoding. Never user-edited.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// The in-progress job specification for one capture session.
///
/// Lives only in the owning workflow's memory; it is either handed off as
/// a [`SubmittedJob`] or discarded on cancel, never persisted here.
#[derive(Debug, Clone, Serialize)]
pub struct JobDraft {
    pub id: Uuid,
    pub mode: JobMode,
    /// User-entered for on-site jobs; forced to the default region for
    /// remote jobs before resolution.
    pub location_text: String,
    /// Set if and only if the draft has passed location resolution.
    pub coordinates: Option<Coordinates>,
    pub title: String,
    pub freelancer_type: String,
    pub deadline: DateTime<Utc>,
    /// Raw form input; validated to parse as a positive decimal.
    pub budget: String,
    /// Insertion-ordered, no dedup. The form starts with one empty slot.
    pub skills: Vec<String>,
    pub description: String,
    pub attachments: AttachmentList,
}

impl JobDraft {
    /// Fresh draft for a new capture session, optionally pre-seeded with a
    /// freelancer type chosen on the upstream role-selection screen.
    pub fn new(preseeded_freelancer_type: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            mode: JobMode::default(),
            location_text: String::new(),
            coordinates: None,
            title: String::new(),
            freelancer_type: preseeded_freelancer_type.unwrap_or_default(),
            deadline: Utc::now(),
            budget: String::new(),
            skills: vec![String::new()],
            description: String::new(),
            attachments: AttachmentList::default(),
        }
    }
}

/// Validated, resolved draft as delivered to the job-creation stage.
/// Immutable once built; coordinates are mandatory at this point.
#[derive(Debug, Clone, Serialize)]
pub struct SubmittedJob {
    pub id: Uuid,
    pub mode: JobMode,
    pub location_text: String,
    pub coordinates: Coordinates,
    pub title: String,
    pub freelancer_type: String,
    pub deadline: DateTime<Utc>,
    pub budget: Decimal,
    pub skills: Vec<String>,
    pub description: String,
    pub attachments: Vec<ImageRef>,
    pub submitted_at: DateTime<Utc>,
}

impl SubmittedJob {
    /// The job as a single opaque navigation payload for the next stage.
    pub fn to_payload(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
