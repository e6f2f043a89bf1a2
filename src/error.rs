//! Unified workflow error handling
//!
//! Every failure the capture workflow can surface, with a stable code for
//! programmatic handling. `Display` carries the message shown in the form.

use thiserror::Error;

use crate::services::doc_store::StoreError;
use crate::services::geocoder::GeocodeError;
use crate::services::media::PickerError;
use crate::validation::ValidationFailure;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    #[error("Location access is needed to use this feature.")]
    LocationPermissionDenied,

    #[error("You need to grant permission to access your photos.")]
    MediaPermissionDenied,

    #[error("Unable to fetch coordinates. Please try again.")]
    NoCoordinatesFound,

    #[error("Failed to fetch coordinates: {0}")]
    Geocoding(#[from] GeocodeError),

    #[error("Error fetching services: {0}")]
    CatalogFetch(#[from] StoreError),

    #[error("Failed to pick images: {0}")]
    MediaPicker(#[from] PickerError),

    #[error("A submission is already in progress")]
    SubmissionInFlight,

    #[error("This draft has already been handed off")]
    AlreadyHandedOff,

    #[error("The next stage is no longer waiting for this draft")]
    HandoffClosed,
}

impl WorkflowError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(failure) => failure.code(),
            Self::LocationPermissionDenied => "LOCATION_PERMISSION_DENIED",
            Self::MediaPermissionDenied => "MEDIA_PERMISSION_DENIED",
            Self::NoCoordinatesFound => "NO_COORDINATES_FOUND",
            Self::Geocoding(_) => "GEOCODING_FAILED",
            Self::CatalogFetch(_) => "CATALOG_FETCH_FAILED",
            Self::MediaPicker(_) => "MEDIA_PICKER_FAILED",
            Self::SubmissionInFlight => "SUBMISSION_IN_FLIGHT",
            Self::AlreadyHandedOff => "ALREADY_HANDED_OFF",
            Self::HandoffClosed => "HANDOFF_CLOSED",
        }
    }

    /// Whether the user can recover by correcting input, granting a
    /// permission, or retrying. Only a consumed or closed handoff is final.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::AlreadyHandedOff | Self::HandoffClosed)
    }
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;
