//! SubScoreProvider port for the external matching service.

use async_trait::async_trait;

use crate::domain::foundation::{CandidateId, DomainError, JobProfileId};
use crate::domain::scoring::SubScores;

/// Source of raw per-criterion sub-scores.
#[async_trait]
pub trait SubScoreProvider: Send + Sync {
    /// Sub-scores of one candidate against one job profile's criteria.
    ///
    /// Coverage and range are not checked here; the scorer does that.
    ///
    /// # Errors
    ///
    /// - `CandidateNotFound` with an `id` detail when the provider knows
    ///   nothing about the candidate
    /// - `SubScoreProviderError` when the provider is unreachable or
    ///   answers with something unusable
    async fn fetch(
        &self,
        job_profile_id: &JobProfileId,
        candidate_id: &CandidateId,
    ) -> Result<SubScores, DomainError>;
}
