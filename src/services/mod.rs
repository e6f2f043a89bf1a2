pub mod doc_store;
pub mod geocoder;
pub mod media;
pub mod permissions;

pub use doc_store::{DocumentStoreClient, RoleCatalogStore};
pub use geocoder::{Geocoder, HttpGeocoder};
pub use media::MediaPicker;
pub use permissions::{LocationPermissions, PermissionStatus};
