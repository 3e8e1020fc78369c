//! GetTopCandidatesHandler - Query handler for the best-scoring candidates.

use std::sync::Arc;

use crate::domain::foundation::JobProfileId;
use crate::domain::scoring::{ScoreRecord, ScoringError, TopCandidatesLimit};
use crate::ports::ScoreRepository;

/// Query for the `limit` highest-scoring candidates of a job profile.
#[derive(Debug, Clone)]
pub struct GetTopCandidatesQuery {
    pub job_profile_id: JobProfileId,
    /// Must be within 1..=100.
    pub limit: i64,
}

/// Handler for ranked score listings.
///
/// Ordered by score descending; ties go to the earlier `scored_at`.
pub struct GetTopCandidatesHandler {
    scores: Arc<dyn ScoreRepository>,
}

impl GetTopCandidatesHandler {
    pub fn new(scores: Arc<dyn ScoreRepository>) -> Self {
        Self { scores }
    }

    pub async fn handle(
        &self,
        query: GetTopCandidatesQuery,
    ) -> Result<Vec<ScoreRecord>, ScoringError> {
        let limit = TopCandidatesLimit::try_new(query.limit)?;
        Ok(self
            .scores
            .top_by_job_profile(&query.job_profile_id, limit.get())
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryScoringStore;
    use crate::domain::foundation::CandidateId;
    use crate::domain::scoring::{ScoreBreakdown, ScoreCard};

    async fn store_with_scores(job: JobProfileId, scores: &[f64]) -> InMemoryScoringStore {
        let store = InMemoryScoringStore::new();
        for score in scores {
            let record = ScoreRecord::from_card(
                job,
                CandidateId::new(),
                ScoreCard {
                    overall_score: *score,
                    breakdown: ScoreBreakdown::default(),
                },
                0.0,
            );
            store.upsert(&record).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn returns_highest_first() {
        let job = JobProfileId::new();
        let handler = GetTopCandidatesHandler::new(Arc::new(
            store_with_scores(job, &[0.9, 0.7, 0.95]).await,
        ));

        let top = handler
            .handle(GetTopCandidatesQuery {
                job_profile_id: job,
                limit: 2,
            })
            .await
            .unwrap();

        let scores: Vec<f64> = top.iter().map(|r| r.overall_score).collect();
        assert_eq!(scores, vec![0.95, 0.9]);
    }

    #[tokio::test]
    async fn limit_above_count_returns_all() {
        let job = JobProfileId::new();
        let handler =
            GetTopCandidatesHandler::new(Arc::new(store_with_scores(job, &[0.1, 0.2]).await));

        let top = handler
            .handle(GetTopCandidatesQuery {
                job_profile_id: job,
                limit: 100,
            })
            .await
            .unwrap();

        assert_eq!(top.len(), 2);
    }

    #[tokio::test]
    async fn rejects_out_of_range_limits() {
        let handler = GetTopCandidatesHandler::new(Arc::new(InMemoryScoringStore::new()));

        for limit in [0, 101, -1] {
            let err = handler
                .handle(GetTopCandidatesQuery {
                    job_profile_id: JobProfileId::new(),
                    limit,
                })
                .await
                .unwrap_err();
            assert!(matches!(err, ScoringError::InvalidLimit { .. }), "{limit}");
        }
    }
}
