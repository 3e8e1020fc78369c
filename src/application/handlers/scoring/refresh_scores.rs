//! RefreshScoresHandler - Command handler for re-deriving weights and rescoring.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

use super::orchestrator::{BatchScoringOrchestrator, ScoringRunKind};
use crate::domain::foundation::{JobProfileId, Timestamp};
use crate::domain::scoring::{BatchScoringReport, ScoringError, ScoringRunStatus};

/// Command to refresh every score of a job profile.
#[derive(Debug, Clone)]
pub struct RefreshScoresCommand {
    pub job_profile_id: JobProfileId,
}

/// Result of a refresh.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshScoresResult {
    /// Completed with at least one candidate scored, or nothing failed.
    pub success: bool,
    pub refreshed_at: Timestamp,
    pub report: BatchScoringReport,
}

/// Handler for refreshing scores after judgments change.
///
/// Re-derives weights from the current judgments, refuses them if they are
/// no longer consistent, persists them, then rescores every candidate.
pub struct RefreshScoresHandler {
    orchestrator: Arc<BatchScoringOrchestrator>,
}

impl RefreshScoresHandler {
    pub fn new(orchestrator: Arc<BatchScoringOrchestrator>) -> Self {
        Self { orchestrator }
    }

    pub async fn handle(
        &self,
        cmd: RefreshScoresCommand,
    ) -> Result<RefreshScoresResult, ScoringError> {
        let (_cancel_tx, cancel_rx) = watch::channel(false);
        self.handle_cancellable(cmd, cancel_rx).await
    }

    pub async fn handle_cancellable(
        &self,
        cmd: RefreshScoresCommand,
        cancel: watch::Receiver<bool>,
    ) -> Result<RefreshScoresResult, ScoringError> {
        let report = self
            .orchestrator
            .run(cmd.job_profile_id, ScoringRunKind::Refresh, cancel)
            .await?;

        Ok(RefreshScoresResult {
            success: report.success && report.status == ScoringRunStatus::Completed,
            refreshed_at: report.processed_at,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::scoring::test_fixtures::{seeded_profile, ProfileFixture};
    use crate::application::handlers::scoring::ScoringModelLoader;
    use crate::domain::ahp::Judgment;
    use crate::ports::{CriteriaRepository, ScoreRepository};

    fn handler(fixture: &ProfileFixture) -> RefreshScoresHandler {
        RefreshScoresHandler::new(Arc::new(BatchScoringOrchestrator::new(
            ScoringModelLoader::new(Arc::new(fixture.store.clone())),
            Arc::new(fixture.store.clone()),
            Arc::new(fixture.provider.clone()),
            Arc::new(fixture.store.clone()),
        )))
    }

    fn judgments(fixture: &ProfileFixture, values: [f64; 3]) -> Vec<Judgment> {
        let c = &fixture.criteria;
        vec![
            Judgment::new(fixture.job_profile_id, c[0].id, c[1].id, values[0]),
            Judgment::new(fixture.job_profile_id, c[0].id, c[2].id, values[1]),
            Judgment::new(fixture.job_profile_id, c[1].id, c[2].id, values[2]),
        ]
    }

    #[tokio::test]
    async fn refresh_succeeds_and_persists_weights() {
        let fixture = seeded_profile().await;

        let result = handler(&fixture)
            .handle(RefreshScoresCommand {
                job_profile_id: fixture.job_profile_id,
            })
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.report.candidates_scored, 3);
        let criteria = fixture
            .store
            .find_criteria(&fixture.job_profile_id)
            .await
            .unwrap();
        let sum: f64 = criteria.iter().filter_map(|c| c.weight).sum();
        assert!((sum - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn refresh_picks_up_changed_judgments() {
        let fixture = seeded_profile().await;
        let handler = handler(&fixture);
        let cmd = RefreshScoresCommand {
            job_profile_id: fixture.job_profile_id,
        };
        handler.handle(cmd.clone()).await.unwrap();

        // Education now dominates
        fixture
            .store
            .replace_judgments(
                fixture.job_profile_id,
                judgments(&fixture, [1.0, 1.0 / 5.0, 1.0 / 5.0]),
            )
            .await;
        handler.handle(cmd).await.unwrap();

        let record = fixture
            .store
            .find(&fixture.job_profile_id, &fixture.candidates[0])
            .await
            .unwrap()
            .unwrap();
        let education = record.breakdown.get("education").unwrap();
        let skills = record.breakdown.get("skills").unwrap();
        assert!(education.weight > skills.weight);
    }

    #[tokio::test]
    async fn refresh_rejects_judgments_that_became_inconsistent() {
        let fixture = seeded_profile().await;
        fixture
            .store
            .replace_judgments(
                fixture.job_profile_id,
                judgments(&fixture, [9.0, 1.0 / 9.0, 9.0]),
            )
            .await;

        let err = handler(&fixture)
            .handle(RefreshScoresCommand {
                job_profile_id: fixture.job_profile_id,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ScoringError::InconsistentMatrix { .. }));
        let criteria = fixture
            .store
            .find_criteria(&fixture.job_profile_id)
            .await
            .unwrap();
        assert!(criteria.iter().all(|c| c.weight.is_none()));
    }

    #[tokio::test]
    async fn cancelled_refresh_is_not_success() {
        let fixture = seeded_profile().await;
        let (tx, rx) = watch::channel(false);
        tx.send(true).unwrap();

        let result = handler(&fixture)
            .handle_cancellable(
                RefreshScoresCommand {
                    job_profile_id: fixture.job_profile_id,
                },
                rx,
            )
            .await
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.report.status, ScoringRunStatus::Cancelled);
    }
}
