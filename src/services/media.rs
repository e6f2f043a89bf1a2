//! Media picker port

use async_trait::async_trait;
use thiserror::Error;

use super::permissions::PermissionStatus;
use crate::domain::attachments::ImageRef;

#[derive(Debug, Error)]
pub enum PickerError {
    #[error("{0}")]
    Platform(String),
}

/// Port for the host platform's image picker. `pick_images` returns refs
/// in selection order; an empty list means the user cancelled the picker.
#[async_trait]
pub trait MediaPicker: Send + Sync {
    /// Asks for media-library access before opening the picker.
    async fn request_permission(&self) -> PermissionStatus;

    /// Opens the multi-select picker.
    async fn pick_images(&self) -> Result<Vec<ImageRef>, PickerError>;
}
