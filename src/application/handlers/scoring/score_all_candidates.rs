//! ScoreAllCandidatesHandler - Command handler for batch scoring.

use std::sync::Arc;

use tokio::sync::watch;

use super::orchestrator::{BatchScoringOrchestrator, ScoringRunKind};
use crate::domain::foundation::JobProfileId;
use crate::domain::scoring::{BatchScoringReport, ScoringError};

/// Command to score every candidate of a job profile.
#[derive(Debug, Clone)]
pub struct ScoreAllCandidatesCommand {
    pub job_profile_id: JobProfileId,
}

/// Handler for scoring all candidates with the current judgments.
pub struct ScoreAllCandidatesHandler {
    orchestrator: Arc<BatchScoringOrchestrator>,
}

impl ScoreAllCandidatesHandler {
    pub fn new(orchestrator: Arc<BatchScoringOrchestrator>) -> Self {
        Self { orchestrator }
    }

    pub async fn handle(
        &self,
        cmd: ScoreAllCandidatesCommand,
    ) -> Result<BatchScoringReport, ScoringError> {
        let (_cancel_tx, cancel_rx) = watch::channel(false);
        self.handle_cancellable(cmd, cancel_rx).await
    }

    /// Like `handle`, but stops dispatching once `cancel` reads `true`.
    pub async fn handle_cancellable(
        &self,
        cmd: ScoreAllCandidatesCommand,
        cancel: watch::Receiver<bool>,
    ) -> Result<BatchScoringReport, ScoringError> {
        self.orchestrator
            .run(cmd.job_profile_id, ScoringRunKind::ScoreAll, cancel)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::scoring::test_fixtures::seeded_profile;
    use crate::application::handlers::scoring::ScoringModelLoader;
    use crate::domain::scoring::ScoringRunStatus;

    #[tokio::test]
    async fn reports_counts_and_average() {
        let fixture = seeded_profile().await;
        let orchestrator = BatchScoringOrchestrator::new(
            ScoringModelLoader::new(Arc::new(fixture.store.clone())),
            Arc::new(fixture.store.clone()),
            Arc::new(fixture.provider.clone()),
            Arc::new(fixture.store.clone()),
        );
        let handler = ScoreAllCandidatesHandler::new(Arc::new(orchestrator));

        let report = handler
            .handle(ScoreAllCandidatesCommand {
                job_profile_id: fixture.job_profile_id,
            })
            .await
            .unwrap();

        assert_eq!(report.status, ScoringRunStatus::Completed);
        assert_eq!(report.candidates_scored, 3);
        // Sub-score levels are 1/4, 2/4 and 3/4.
        assert!((report.average_score - 0.5).abs() < 1e-9);
        assert_eq!(report.job_profile_id, fixture.job_profile_id);
    }

    #[tokio::test]
    async fn profile_without_candidates_completes_empty() {
        let fixture = seeded_profile().await;
        let empty = crate::adapters::memory::InMemoryScoringStore::new();
        let orchestrator = BatchScoringOrchestrator::new(
            ScoringModelLoader::new(Arc::new(fixture.store.clone())),
            Arc::new(empty),
            Arc::new(fixture.provider.clone()),
            Arc::new(fixture.store.clone()),
        );
        let handler = ScoreAllCandidatesHandler::new(Arc::new(orchestrator));

        let report = handler
            .handle(ScoreAllCandidatesCommand {
                job_profile_id: fixture.job_profile_id,
            })
            .await
            .unwrap();

        assert_eq!(report.candidates_scored, 0);
        assert_eq!(report.average_score, 0.0);
        assert!(report.success);
    }
}
