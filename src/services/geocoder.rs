//! Forward geocoding client
//!
//! Converts free-text location into candidate coordinates through a
//! Nominatim-shaped search endpoint. The resolver in the workflow takes
//! the first candidate.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};

use crate::config::Settings;
use crate::domain::job::Coordinates;

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("geocoding service unavailable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("geocoding service rejected the request: {status}")]
    Status { status: StatusCode },

    #[error("invalid geocoding response: {0}")]
    Decode(String),
}

/// Port for forward geocoding.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Forward-geocodes free text into an ordered candidate list. An empty
    /// list means the service found no match; that is not an error here.
    async fn forward_geocode(&self, query: &str) -> Result<Vec<Coordinates>, GeocodeError>;
}

/// reqwest-backed client for the external geocoding service.
#[derive(Clone)]
pub struct HttpGeocoder {
    client: Client,
    endpoint: String,
    max_candidates: usize,
}

impl HttpGeocoder {
    pub fn new(endpoint: &str, timeout_seconds: u64, max_candidates: usize) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        tracing::info!(endpoint = endpoint, "Geocoder client initialized");

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            max_candidates,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(
            &settings.geocoder_endpoint,
            settings.geocoder_timeout_seconds,
            settings.geocoder_max_candidates,
        )
    }
}

/// Candidate row in the search response. The service returns lat/lon as
/// strings.
#[derive(Debug, Deserialize)]
struct GeocodeCandidate {
    lat: String,
    lon: String,
}

#[async_trait]
impl Geocoder for HttpGeocoder {
    async fn forward_geocode(&self, query: &str) -> Result<Vec<Coordinates>, GeocodeError> {
        let url = format!("{}/search", self.endpoint);

        debug!(query = %query, "Forward geocoding");

        let limit = self.max_candidates.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("format", "jsonv2"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!(status = %status, "Geocoding service error");
            return Err(GeocodeError::Status { status });
        }

        let candidates: Vec<GeocodeCandidate> = response
            .json()
            .await
            .map_err(|e| GeocodeError::Decode(e.to_string()))?;

        candidates
            .into_iter()
            .map(|candidate| {
                let latitude = candidate
                    .lat
                    .parse::<f64>()
                    .map_err(|_| GeocodeError::Decode(format!("bad latitude: {}", candidate.lat)))?;
                let longitude = candidate
                    .lon
                    .parse::<f64>()
                    .map_err(|_| GeocodeError::Decode(format!("bad longitude: {}", candidate.lon)))?;
                Ok(Coordinates {
                    latitude,
                    longitude,
                })
            })
            .collect()
    }
}
