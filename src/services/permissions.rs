//! Platform permission port
//!
//! Permission prompts are owned by the host app; the workflow only needs
//! a grant/deny answer before geocoding.

use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

impl PermissionStatus {
    pub fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Port for the platform location-permission prompt.
#[async_trait]
pub trait LocationPermissions: Send + Sync {
    /// Asks the platform for foreground location access.
    async fn request_foreground_location(&self) -> PermissionStatus;
}
