//! GetCandidateScoreHandler - Query handler for one stored score.

use std::sync::Arc;

use crate::domain::foundation::{CandidateId, JobProfileId};
use crate::domain::scoring::{ScoreRecord, ScoringError};
use crate::ports::ScoreRepository;

/// Query for a candidate's stored score.
#[derive(Debug, Clone)]
pub struct GetCandidateScoreQuery {
    pub job_profile_id: JobProfileId,
    pub candidate_id: CandidateId,
}

/// Handler for reading a stored score. Returns `None` if never scored.
pub struct GetCandidateScoreHandler {
    scores: Arc<dyn ScoreRepository>,
}

impl GetCandidateScoreHandler {
    pub fn new(scores: Arc<dyn ScoreRepository>) -> Self {
        Self { scores }
    }

    pub async fn handle(
        &self,
        query: GetCandidateScoreQuery,
    ) -> Result<Option<ScoreRecord>, ScoringError> {
        Ok(self
            .scores
            .find(&query.job_profile_id, &query.candidate_id)
            .await?)
    }
}
