// Stats API client.
//
// `StatsSource` is the seam between the orchestrator and the network: the
// reqwest-backed `StatsClient` talks to the real API, tests plug in a fake.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use dreamteam_core::config::Config;
use dreamteam_core::player::{PlayerDetail, PlayerId};
use dreamteam_core::season::SeasonCode;
use dreamteam_core::wire::{PeopleResponse, TeamsResponse};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        source: reqwest::Error,
    },

    #[error("no person record returned for player {0}")]
    PersonNotFound(PlayerId),
}

// ---------------------------------------------------------------------------
// StatsSource
// ---------------------------------------------------------------------------

/// Read-only access to season rosters and player details.
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Every team (with roster, where available) for one season.
    async fn fetch_season(&self, season: SeasonCode) -> Result<TeamsResponse, ApiError>;

    /// Nationality and primary position for one player.
    async fn fetch_person(&self, id: PlayerId) -> Result<PlayerDetail, ApiError>;
}

// ---------------------------------------------------------------------------
// StatsClient
// ---------------------------------------------------------------------------

/// HTTP client for the public stats API.
pub struct StatsClient {
    http: reqwest::Client,
    base_url: String,
}

impl StatsClient {
    /// Create a client rooted at `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api.base_url.clone())
    }

    /// Build the team-roster request for a season.
    pub fn season_request(&self, season: SeasonCode) -> reqwest::Result<reqwest::Request> {
        let code = season.to_string();
        self.http
            .get(format!("{}/teams", self.base_url))
            .query(&[("expand", "team.roster"), ("season", code.as_str())])
            .build()
    }

    /// Build the person-detail request for a player.
    pub fn person_request(&self, id: PlayerId) -> reqwest::Result<reqwest::Request> {
        self.http
            .get(format!("{}/people/{}", self.base_url, id))
            .build()
    }

    async fn execute<T: DeserializeOwned>(&self, request: reqwest::Request) -> Result<T, ApiError> {
        let url = request.url().to_string();
        debug!(%url, "GET");

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| ApiError::Request {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { url, status });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode { url, source: e })
    }
}

#[async_trait]
impl StatsSource for StatsClient {
    async fn fetch_season(&self, season: SeasonCode) -> Result<TeamsResponse, ApiError> {
        let request = self.season_request(season).map_err(|e| ApiError::Request {
            url: format!("{}/teams", self.base_url),
            source: e,
        })?;
        self.execute(request).await
    }

    async fn fetch_person(&self, id: PlayerId) -> Result<PlayerDetail, ApiError> {
        let request = self.person_request(id).map_err(|e| ApiError::Request {
            url: format!("{}/people/{}", self.base_url, id),
            source: e,
        })?;
        let people: PeopleResponse = self.execute(request).await?;
        people.into_detail().ok_or(ApiError::PersonNotFound(id))
    }
}
