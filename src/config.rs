use anyhow::{Context, Result};
use std::env;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            "staging" => Self::Staging,
            _ => Self::Dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }

    pub fn is_prod(&self) -> bool {
        matches!(self, Self::Prod)
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub env: Environment,

    // Document store (role catalog)
    pub doc_store_endpoint: String,
    pub doc_store_project_id: String,
    pub doc_store_api_key: String,
    pub doc_store_database_id: String,
    pub role_collection_id: String,
    pub doc_store_timeout_seconds: u64,

    // Geocoding service
    pub geocoder_endpoint: String,
    pub geocoder_timeout_seconds: u64,
    pub geocoder_max_candidates: usize,

    // Region substituted for the job location on remote jobs
    pub remote_default_region: String,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let env = Environment::from_str(&env::var("ENV").unwrap_or_else(|_| "dev".to_string()));

        // Document store
        let doc_store_endpoint =
            env::var("DOC_STORE_ENDPOINT").context("DOC_STORE_ENDPOINT must be set")?;
        Url::parse(&doc_store_endpoint).context("DOC_STORE_ENDPOINT must be a valid URL")?;
        let doc_store_project_id =
            env::var("DOC_STORE_PROJECT_ID").context("DOC_STORE_PROJECT_ID must be set")?;
        let doc_store_api_key =
            env::var("DOC_STORE_API_KEY").context("DOC_STORE_API_KEY must be set")?;
        let doc_store_database_id =
            env::var("DOC_STORE_DATABASE_ID").context("DOC_STORE_DATABASE_ID must be set")?;
        let role_collection_id =
            env::var("ROLE_COLLECTION_ID").context("ROLE_COLLECTION_ID must be set")?;
        let doc_store_timeout_seconds = env::var("DOC_STORE_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        // Geocoder
        let geocoder_endpoint = env::var("GEOCODER_ENDPOINT")
            .unwrap_or_else(|_| "https://nominatim.openstreetmap.org".to_string());
        Url::parse(&geocoder_endpoint).context("GEOCODER_ENDPOINT must be a valid URL")?;
        let geocoder_timeout_seconds = env::var("GEOCODER_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(15);
        let geocoder_max_candidates = env::var("GEOCODER_MAX_CANDIDATES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);

        let remote_default_region =
            env::var("REMOTE_DEFAULT_REGION").unwrap_or_else(|_| "India".to_string());

        Ok(Settings {
            env,
            doc_store_endpoint,
            doc_store_project_id,
            doc_store_api_key,
            doc_store_database_id,
            role_collection_id,
            doc_store_timeout_seconds,
            geocoder_endpoint,
            geocoder_timeout_seconds,
            geocoder_max_candidates,
            remote_default_region,
        })
    }
}
