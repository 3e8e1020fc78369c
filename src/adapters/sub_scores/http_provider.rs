//! HTTP Sub-Score Provider - Implementation of SubScoreProvider over the
//! matching service's REST API.
//!
//! # Endpoint
//!
//! ```text
//! GET {base_url}/api/job-profiles/{job_profile_id}/candidates/{candidate_id}/sub-scores
//!
//! 200 {"sub_scores": {"<criterion uuid>": 0.82, ...}}
//! 404 candidate unknown to the matching service
//! ```

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use crate::domain::foundation::{CandidateId, DomainError, ErrorCode, JobProfileId};
use crate::domain::scoring::SubScores;
use crate::ports::SubScoreProvider;

/// Configuration for the HTTP sub-score provider.
#[derive(Debug, Clone)]
pub struct HttpSubScoreConfig {
    /// Base URL of the matching service, without trailing slash.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Bearer token, if the service requires one.
    api_key: Option<Secret<String>>,
}

impl HttpSubScoreConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(10),
            api_key: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_api_key(mut self, api_key: Secret<String>) -> Self {
        self.api_key = Some(api_key);
        self
    }
}

#[derive(Debug, Deserialize)]
struct SubScoresResponse {
    sub_scores: SubScores,
}

/// Fetches sub-scores from the matching service.
pub struct HttpSubScoreProvider {
    config: HttpSubScoreConfig,
    client: Client,
}

impl HttpSubScoreProvider {
    pub fn new(config: HttpSubScoreConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("Failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self { config, client })
    }

    fn sub_scores_url(&self, job_profile_id: &JobProfileId, candidate_id: &CandidateId) -> String {
        format!(
            "{}/api/job-profiles/{}/candidates/{}/sub-scores",
            self.config.base_url, job_profile_id, candidate_id
        )
    }
}

fn provider_error(message: impl Into<String>) -> DomainError {
    DomainError::new(ErrorCode::SubScoreProviderError, message)
}

/// A 404 means the matching service has no record of the candidate.
fn missing_candidate(status: StatusCode, candidate_id: &CandidateId) -> Option<DomainError> {
    (status == StatusCode::NOT_FOUND).then(|| DomainError::candidate_not_found(candidate_id))
}

fn parse_sub_scores(body: &str) -> Result<SubScores, DomainError> {
    serde_json::from_str::<SubScoresResponse>(body)
        .map(|r| r.sub_scores)
        .map_err(|e| provider_error(format!("Failed to parse sub-scores: {}", e)))
}

#[async_trait]
impl SubScoreProvider for HttpSubScoreProvider {
    async fn fetch(
        &self,
        job_profile_id: &JobProfileId,
        candidate_id: &CandidateId,
    ) -> Result<SubScores, DomainError> {
        let mut request = self.client.get(self.sub_scores_url(job_profile_id, candidate_id));
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key.expose_secret());
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                provider_error(format!(
                    "Sub-score request timed out after {}s",
                    self.config.timeout.as_secs()
                ))
            } else if e.is_connect() {
                provider_error(format!("Connection failed: {}", e))
            } else {
                provider_error(e.to_string())
            }
        })?;

        let status = response.status();
        if let Some(err) = missing_candidate(status, candidate_id) {
            return Err(err);
        }

        let body = response
            .text()
            .await
            .map_err(|e| provider_error(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(provider_error(format!(
                "Unexpected status {}: {}",
                status, body
            )));
        }

        parse_sub_scores(&body)
    }
}
