//! Static sub-score provider.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{CandidateId, DomainError, ErrorCode, JobProfileId};
use crate::domain::scoring::SubScores;
use crate::ports::SubScoreProvider;

/// Serves sub-scores registered up front.
#[derive(Debug, Clone, Default)]
pub struct StaticSubScoreProvider {
    scores: Arc<RwLock<HashMap<(JobProfileId, CandidateId), SubScores>>>,
    unavailable: Arc<RwLock<HashSet<CandidateId>>>,
}

impl StaticSubScoreProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set(
        &self,
        job_profile_id: JobProfileId,
        candidate_id: CandidateId,
        sub_scores: SubScores,
    ) {
        self.scores
            .write()
            .await
            .insert((job_profile_id, candidate_id), sub_scores);
    }

    /// Make every fetch for this candidate fail as if the service were down.
    pub async fn make_unavailable(&self, candidate_id: CandidateId) {
        self.unavailable.write().await.insert(candidate_id);
    }
}

#[async_trait]
impl SubScoreProvider for StaticSubScoreProvider {
    async fn fetch(
        &self,
        job_profile_id: &JobProfileId,
        candidate_id: &CandidateId,
    ) -> Result<SubScores, DomainError> {
        if self.unavailable.read().await.contains(candidate_id) {
            return Err(DomainError::new(
                ErrorCode::SubScoreProviderError,
                format!("Sub-scores unavailable for candidate {}", candidate_id),
            ));
        }
        self.scores
            .read()
            .await
            .get(&(*job_profile_id, *candidate_id))
            .cloned()
            .ok_or_else(|| DomainError::candidate_not_found(candidate_id))
    }
}
