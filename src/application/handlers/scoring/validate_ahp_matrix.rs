//! ValidateAhpMatrixHandler - Query handler for judgment consistency.

use serde::Serialize;

use super::scoring_model::ScoringModelLoader;
use crate::domain::foundation::{CriterionId, JobProfileId, Timestamp};
use crate::domain::scoring::ScoringError;

/// Query to check a job profile's judgments.
#[derive(Debug, Clone)]
pub struct ValidateAhpMatrixQuery {
    pub job_profile_id: JobProfileId,
}

/// A criterion's derived weight, for display next to the verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionWeight {
    pub criterion_id: CriterionId,
    pub name: String,
    pub weight: f64,
}

/// Consistency verdict for a job profile's judgments.
#[derive(Debug, Clone, Serialize)]
pub struct ValidateAhpMatrixResult {
    pub job_profile_id: JobProfileId,
    pub is_consistent: bool,
    pub consistency_ratio: f64,
    pub consistency_index: f64,
    pub lambda_max: f64,
    pub weights: Vec<CriterionWeight>,
    pub validated_at: Timestamp,
}

/// Handler reporting whether judgments are consistent enough to score with.
///
/// An inconsistent matrix is a normal result here, not an error. Structural
/// problems (missing or invalid judgments) are still errors.
pub struct ValidateAhpMatrixHandler {
    loader: ScoringModelLoader,
}

impl ValidateAhpMatrixHandler {
    pub fn new(loader: ScoringModelLoader) -> Self {
        Self { loader }
    }

    pub async fn handle(
        &self,
        query: ValidateAhpMatrixQuery,
    ) -> Result<ValidateAhpMatrixResult, ScoringError> {
        let profile = self.loader.analyze(query.job_profile_id).await?;
        let consistency = profile.analysis.consistency;

        let weights = profile
            .criteria
            .iter()
            .filter_map(|c| {
                profile
                    .analysis
                    .priorities
                    .weight_of(&c.id)
                    .map(|weight| CriterionWeight {
                        criterion_id: c.id,
                        name: c.name.clone(),
                        weight,
                    })
            })
            .collect();

        Ok(ValidateAhpMatrixResult {
            job_profile_id: query.job_profile_id,
            is_consistent: consistency.is_consistent,
            consistency_ratio: consistency.consistency_ratio,
            consistency_index: consistency.consistency_index,
            lambda_max: consistency.lambda_max,
            weights,
            validated_at: Timestamp::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryScoringStore;
    use crate::application::handlers::scoring::test_fixtures::{
        contradictory_profile, seeded_profile,
    };
    use crate::domain::ahp::{AhpError, Criterion, JudgmentDefect};
    use crate::domain::foundation::ErrorCode;
    use std::sync::Arc;

    #[tokio::test]
    async fn consistent_judgments_validate() {
        let fixture = seeded_profile().await;
        let handler = ValidateAhpMatrixHandler::new(ScoringModelLoader::new(Arc::new(
            fixture.store.clone(),
        )));

        let result = handler
            .handle(ValidateAhpMatrixQuery {
                job_profile_id: fixture.job_profile_id,
            })
            .await
            .unwrap();

        assert!(result.is_consistent);
        assert!(result.consistency_ratio <= 0.10);
        assert!(result.lambda_max >= 3.0);
        assert_eq!(result.weights.len(), 3);
        assert_eq!(result.weights[0].name, "skills");
    }

    #[tokio::test]
    async fn contradictory_judgments_are_reported_inconsistent() {
        let fixture = contradictory_profile().await;
        let handler = ValidateAhpMatrixHandler::new(ScoringModelLoader::new(Arc::new(
            fixture.store.clone(),
        )));

        let result = handler
            .handle(ValidateAhpMatrixQuery {
                job_profile_id: fixture.job_profile_id,
            })
            .await
            .unwrap();

        assert!(!result.is_consistent);
        assert!(result.consistency_ratio > 0.10);
    }

    #[tokio::test]
    async fn incomplete_judgments_list_missing_pairs() {
        let store = InMemoryScoringStore::new();
        let job = JobProfileId::new();
        for name in ["skills", "experience", "education"] {
            store.add_criterion(Criterion::new(job, name)).await;
        }
        let handler = ValidateAhpMatrixHandler::new(ScoringModelLoader::new(Arc::new(store)));

        let err = handler
            .handle(ValidateAhpMatrixQuery {
                job_profile_id: job,
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::IncompleteJudgmentSet);
        match err {
            ScoringError::Ahp(AhpError::IncompleteJudgmentSet { defect, pairs }) => {
                assert_eq!(defect, JudgmentDefect::Missing);
                assert_eq!(pairs.len(), 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn single_criterion_is_trivially_consistent() {
        let store = InMemoryScoringStore::new();
        let job = JobProfileId::new();
        store.add_criterion(Criterion::new(job, "skills")).await;
        let handler = ValidateAhpMatrixHandler::new(ScoringModelLoader::new(Arc::new(store)));

        let result = handler
            .handle(ValidateAhpMatrixQuery {
                job_profile_id: job,
            })
            .await
            .unwrap();

        assert!(result.is_consistent);
        assert_eq!(result.consistency_ratio, 0.0);
        assert_eq!(result.weights[0].weight, 1.0);
    }
}
