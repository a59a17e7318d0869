use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;
use crate::providers::{ContentProvider, Edition, EditionItem, EditionSection};

/// Client for the alquran.cloud content API
#[derive(Debug, Clone)]
pub struct AlQuranCloud {
    /// HTTP client for API requests
    client: Client,
    /// Base URL of the API (e.g. `https://api.alquran.cloud/v1`)
    endpoint: String,
}

/// Response envelope shared by every endpoint of the API
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Status code mirrored in the body
    pub code: u16,
    /// Status text (`OK` on success)
    pub status: String,
    /// Payload; an error string when `code` is not 200
    pub data: T,
}

/// Payload of `GET /quran/{edition}`
#[derive(Debug, Deserialize)]
pub struct QuranData {
    pub surahs: Vec<Surah>,
}

/// A surah in an API response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Surah {
    pub number: u32,
    pub name: String,
    pub english_name: String,
    #[serde(default)]
    pub ayahs: Vec<Ayah>,
}

/// An ayah in an API response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ayah {
    /// Global ayah number
    pub number: u32,
    pub number_in_surah: u32,
    pub text: String,
    /// Only present for audio editions
    #[serde(default)]
    pub audio: Option<String>,
}

impl AlQuranCloud {
    /// Create a new client
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
        }
    }

    /// URL of the full-edition resource
    pub fn edition_url(&self, edition: &str) -> Result<Url, ProviderError> {
        let base = format!("{}/", self.endpoint.trim_end_matches('/'));
        Url::parse(&base)
            .and_then(|base| base.join(&format!("quran/{}", edition)))
            .map_err(|e| ProviderError::RequestFailed(format!("Invalid endpoint '{}': {}", self.endpoint, e)))
    }

    /// Convert a raw response body into an edition
    pub fn parse_edition(edition: &str, body: &str) -> Result<Edition, ProviderError> {
        let envelope: ApiEnvelope<serde_json::Value> = serde_json::from_str(body)
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        if envelope.code != 200 {
            let message = envelope
                .data
                .as_str()
                .map(str::to_string)
                .unwrap_or(envelope.status);
            return Err(ProviderError::ApiError {
                status_code: envelope.code,
                message,
            });
        }

        let data: QuranData = serde_json::from_value(envelope.data)
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        let sections = data
            .surahs
            .into_iter()
            .map(|surah| EditionSection {
                number: surah.number,
                name: surah.name,
                english_name: surah.english_name,
                items: surah
                    .ayahs
                    .into_iter()
                    .map(|ayah| EditionItem {
                        number_in_section: ayah.number_in_surah,
                        text: ayah.text,
                        audio: ayah.audio.filter(|a| !a.trim().is_empty()),
                    })
                    .collect(),
            })
            .collect();

        Ok(Edition {
            identifier: edition.to_string(),
            sections,
        })
    }
}

#[async_trait]
impl ContentProvider for AlQuranCloud {
    async fn fetch_edition(&self, edition: &str) -> Result<Edition, ProviderError> {
        let url = self.edition_url(edition)?;
        debug!("Fetching edition {} from {}", edition, url);

        let response = self.client.get(url.clone())
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    ProviderError::ConnectionError(e.to_string())
                } else {
                    ProviderError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response.text().await
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            error!("Content API error ({}) for {}: {}", status, url, body);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: body,
            });
        }

        Self::parse_edition(edition, &body)
    }
}
