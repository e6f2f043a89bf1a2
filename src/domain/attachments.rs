//! Attachment list for the draft
//!
//! Ordered references to picked portfolio images. Selection order is
//! preserved; there is no cap and no dedup. Size and dimension limits are
//! advisory text in the form, not enforced here.

use serde::{Deserialize, Serialize};

/// Reference to a picked image in the device media library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub uri: String,
}

impl ImageRef {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }
}

/// Ordered list of picked images attached to the draft.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AttachmentList {
    items: Vec<ImageRef>,
}

impl AttachmentList {
    /// Appends newly picked refs in selection order.
    pub fn append(&mut self, picked: impl IntoIterator<Item = ImageRef>) {
        self.items.extend(picked);
    }

    /// Removes exactly one element, shifting the rest left. Out-of-range
    /// indices are a no-op.
    pub fn remove(&mut self, index: usize) -> Option<ImageRef> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn as_slice(&self) -> &[ImageRef] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
