//! CalculateScoreHandler - Command handler for scoring one candidate.

use std::sync::Arc;

use tracing::info;

use super::scoring_model::ScoringModelLoader;
use crate::domain::foundation::{CandidateId, JobProfileId};
use crate::domain::scoring::{ScoreRecord, ScoringError};
use crate::ports::{ScoreRepository, SubScoreProvider};

/// Command to score one candidate against one job profile.
#[derive(Debug, Clone)]
pub struct CalculateScoreCommand {
    pub job_profile_id: JobProfileId,
    pub candidate_id: CandidateId,
}

/// Handler for scoring a single candidate.
///
/// Derives and validates weights, fetches the candidate's sub-scores,
/// scores them and upserts the record.
pub struct CalculateScoreHandler {
    loader: ScoringModelLoader,
    sub_scores: Arc<dyn SubScoreProvider>,
    scores: Arc<dyn ScoreRepository>,
}

impl CalculateScoreHandler {
    pub fn new(
        loader: ScoringModelLoader,
        sub_scores: Arc<dyn SubScoreProvider>,
        scores: Arc<dyn ScoreRepository>,
    ) -> Self {
        Self {
            loader,
            sub_scores,
            scores,
        }
    }

    pub async fn handle(&self, cmd: CalculateScoreCommand) -> Result<ScoreRecord, ScoringError> {
        // 1. Derive weights; refuses inconsistent judgments
        let model = self.loader.load(cmd.job_profile_id).await?;

        // 2. Score and persist
        let record = model
            .score_candidate(cmd.candidate_id, self.sub_scores.as_ref(), self.scores.as_ref())
            .await?;

        info!(
            job_profile_id = %cmd.job_profile_id,
            candidate_id = %cmd.candidate_id,
            overall_score = record.overall_score,
            "Candidate scored"
        );

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryScoringStore;
    use crate::application::handlers::scoring::test_fixtures::{
        contradictory_profile, seeded_profile, ProfileFixture,
    };
    use crate::domain::foundation::{DomainError, ErrorCode};
    use crate::domain::scoring::{Resource, SubScores};
    use async_trait::async_trait;

    fn handler(fixture: &ProfileFixture) -> CalculateScoreHandler {
        CalculateScoreHandler::new(
            ScoringModelLoader::new(Arc::new(fixture.store.clone())),
            Arc::new(fixture.provider.clone()),
            Arc::new(fixture.store.clone()),
        )
    }

    struct FailingScoreRepository;

    #[async_trait]
    impl ScoreRepository for FailingScoreRepository {
        async fn upsert(&self, _record: &ScoreRecord) -> Result<ScoreRecord, DomainError> {
            Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Simulated upsert failure",
            ))
        }

        async fn find(
            &self,
            _job_profile_id: &JobProfileId,
            _candidate_id: &CandidateId,
        ) -> Result<Option<ScoreRecord>, DomainError> {
            Ok(None)
        }

        async fn top_by_job_profile(
            &self,
            _job_profile_id: &JobProfileId,
            _limit: usize,
        ) -> Result<Vec<ScoreRecord>, DomainError> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn scores_and_stores_candidate() {
        let fixture = seeded_profile().await;
        let candidate = fixture.candidates[1];

        let record = handler(&fixture)
            .handle(CalculateScoreCommand {
                job_profile_id: fixture.job_profile_id,
                candidate_id: candidate,
            })
            .await
            .unwrap();

        assert_eq!(record.candidate_id, candidate);
        assert_eq!(record.methodology, "AHP");
        // Every sub-score of the second candidate is 2/4.
        assert!((record.overall_score - 0.5).abs() < 1e-9);
        let stored = fixture
            .store
            .find(&fixture.job_profile_id, &candidate)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored, record);
    }

    #[tokio::test]
    async fn weights_follow_judgments() {
        let fixture = seeded_profile().await;
        let candidate = CandidateId::new();
        let ids: Vec<_> = fixture.criteria.iter().map(|c| c.id).collect();
        fixture
            .provider
            .set(
                fixture.job_profile_id,
                candidate,
                SubScores::from([(ids[0], 1.0), (ids[1], 0.0), (ids[2], 0.0)]),
            )
            .await;

        let record = handler(&fixture)
            .handle(CalculateScoreCommand {
                job_profile_id: fixture.job_profile_id,
                candidate_id: candidate,
            })
            .await
            .unwrap();

        // Only skills counts, so the score is its weight (the largest).
        let skills = record.breakdown.get("skills").unwrap();
        assert_eq!(record.overall_score, skills.weight);
        assert!(skills.weight > 0.5);
    }

    #[tokio::test]
    async fn rescoring_keeps_record_id() {
        let fixture = seeded_profile().await;
        let handler = handler(&fixture);
        let cmd = CalculateScoreCommand {
            job_profile_id: fixture.job_profile_id,
            candidate_id: fixture.candidates[0],
        };

        let first = handler.handle(cmd.clone()).await.unwrap();
        let second = handler.handle(cmd).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(fixture.store.score_count().await, 1);
    }

    #[tokio::test]
    async fn unknown_job_profile_is_not_found() {
        let store = InMemoryScoringStore::new();
        let handler = CalculateScoreHandler::new(
            ScoringModelLoader::new(Arc::new(store.clone())),
            Arc::new(crate::adapters::memory::StaticSubScoreProvider::new()),
            Arc::new(store),
        );

        let err = handler
            .handle(CalculateScoreCommand {
                job_profile_id: JobProfileId::new(),
                candidate_id: CandidateId::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ScoringError::NotFound {
                resource: Resource::JobProfile,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn inconsistent_judgments_refuse_scoring() {
        let fixture = contradictory_profile().await;

        let err = handler(&fixture)
            .handle(CalculateScoreCommand {
                job_profile_id: fixture.job_profile_id,
                candidate_id: fixture.candidates[0],
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::InconsistentMatrix);
        assert_eq!(fixture.store.score_count().await, 0);
    }

    #[tokio::test]
    async fn store_failure_is_infrastructure_error() {
        let fixture = seeded_profile().await;
        let handler = CalculateScoreHandler::new(
            ScoringModelLoader::new(Arc::new(fixture.store.clone())),
            Arc::new(fixture.provider.clone()),
            Arc::new(FailingScoreRepository),
        );

        let err = handler
            .handle(CalculateScoreCommand {
                job_profile_id: fixture.job_profile_id,
                candidate_id: fixture.candidates[0],
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ScoringError::Infrastructure(_)));
        assert_eq!(err.code(), ErrorCode::DatabaseError);
    }
}
