//! Role catalog types
//!
//! The catalog is the list of selectable freelancer/service types for the
//! active job mode, built from role records in the document store.

use serde::{Deserialize, Serialize};

/// Category tag attached to role records in the document store.
/// Exactly one category exists per job mode.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CatalogCategory {
    FreelanceService,
    HouseholdService,
}

impl CatalogCategory {
    /// Tag value as stored on the records.
    pub fn tag(self) -> &'static str {
        match self {
            Self::FreelanceService => "freelance_service",
            Self::HouseholdService => "household_service",
        }
    }
}

impl std::fmt::Display for CatalogCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// A role record as stored in the document store: one record carries a
/// list of role names under a shared category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleRecord {
    pub id: String,
    pub role: Vec<String>,
}

/// The selectable freelancer/service types for the active mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServiceCatalog {
    options: Vec<String>,
}

impl ServiceCatalog {
    /// Flattens the records' role-name lists into a single ordered list of
    /// distinct options. First occurrence wins on duplicates.
    pub fn from_records(records: &[RoleRecord]) -> Self {
        let mut options: Vec<String> = Vec::new();
        for record in records {
            for role in &record.role {
                if !options.iter().any(|existing| existing == role) {
                    options.push(role.clone());
                }
            }
        }
        Self { options }
    }

    pub fn contains(&self, option: &str) -> bool {
        self.options.iter().any(|existing| existing == option)
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}
