//! Document store client for the role catalog
//!
//! The marketplace backend exposes an Appwrite-shaped REST interface; the
//! capture workflow only consumes the list operation on the role
//! collection, filtered by category tag.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};

use crate::config::Settings;
use crate::domain::catalog::{CatalogCategory, RoleRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document store unavailable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("document store rejected the request: {status}")]
    Status { status: StatusCode },

    #[error("invalid document store response: {0}")]
    Decode(String),
}

/// Port for the role-catalog list operation. The workflow depends on this
/// seam so the embedding app can swap stores and tests can stub one.
#[async_trait]
pub trait RoleCatalogStore: Send + Sync {
    /// Lists the role records tagged with `category`, in store order.
    async fn roles_for_category(
        &self,
        category: CatalogCategory,
    ) -> Result<Vec<RoleRecord>, StoreError>;
}

/// reqwest-backed client for the production document store.
#[derive(Clone)]
pub struct DocumentStoreClient {
    client: Client,
    endpoint: String,
    project_id: String,
    api_key: String,
    database_id: String,
    role_collection_id: String,
}

impl DocumentStoreClient {
    pub fn new(
        endpoint: &str,
        project_id: &str,
        api_key: &str,
        database_id: &str,
        role_collection_id: &str,
        timeout_seconds: u64,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        tracing::info!(endpoint = endpoint, "Document store client initialized");

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            project_id: project_id.to_string(),
            api_key: api_key.to_string(),
            database_id: database_id.to_string(),
            role_collection_id: role_collection_id.to_string(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(
            &settings.doc_store_endpoint,
            &settings.doc_store_project_id,
            &settings.doc_store_api_key,
            &settings.doc_store_database_id,
            &settings.role_collection_id,
            settings.doc_store_timeout_seconds,
        )
    }
}

#[derive(Debug, Deserialize)]
struct ListDocumentsResponse {
    #[allow(dead_code)]
    total: u64,
    documents: Vec<RoleDocument>,
}

#[derive(Debug, Deserialize)]
struct RoleDocument {
    #[serde(rename = "$id")]
    id: String,
    #[serde(default)]
    role: Vec<String>,
}

#[async_trait]
impl RoleCatalogStore for DocumentStoreClient {
    async fn roles_for_category(
        &self,
        category: CatalogCategory,
    ) -> Result<Vec<RoleRecord>, StoreError> {
        let url = format!(
            "{}/databases/{}/collections/{}/documents",
            self.endpoint, self.database_id, self.role_collection_id
        );

        debug!(url = %url, category = %category, "Listing role documents");

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Project", &self.project_id)
            .header("X-Appwrite-Key", &self.api_key)
            .query(&[("category", category.tag())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!(status = %status, category = %category, "Document store error");
            return Err(StoreError::Status { status });
        }

        let body: ListDocumentsResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        Ok(body
            .documents
            .into_iter()
            .map(|doc| RoleRecord {
                id: doc.id,
                role: doc.role,
            })
            .collect())
    }
}
