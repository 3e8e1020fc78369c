//! ScoringModelLoader - Loads a job profile's judgments and derives the
//! weights every candidate is scored with.

use std::sync::Arc;

use tracing::debug;

use crate::domain::ahp::{round_weight, AhpAnalysis, AhpAnalyzer, ConsistencyReport, Criterion};
use crate::domain::foundation::{CandidateId, CriterionId, JobProfileId};
use crate::domain::scoring::{CandidateScorer, ScoreRecord, ScoringError, WeightedCriterion};
use crate::ports::{CriteriaRepository, ScoreRepository, SubScoreProvider};

/// A job profile's criteria together with the AHP analysis of its judgments.
#[derive(Debug, Clone)]
pub struct ProfileAnalysis {
    pub job_profile_id: JobProfileId,
    pub criteria: Vec<Criterion>,
    pub analysis: AhpAnalysis,
}

impl ProfileAnalysis {
    /// Turns the analysis into a scoring model.
    ///
    /// # Errors
    ///
    /// - `InconsistentMatrix` if the judgments fail the consistency check
    pub fn into_model(self) -> Result<ScoringModel, ScoringError> {
        let consistency = self.analysis.consistency;
        if !consistency.is_consistent {
            return Err(ScoringError::InconsistentMatrix {
                job_profile_id: self.job_profile_id,
                consistency_ratio: consistency.consistency_ratio,
            });
        }
        Ok(ScoringModel {
            job_profile_id: self.job_profile_id,
            criteria: WeightedCriterion::from_priorities(&self.criteria, &self.analysis.priorities),
            consistency,
        })
    }
}

/// Validated weights for one job profile.
///
/// Immutable once built; a batch run shares one instance across all of
/// its candidate tasks.
#[derive(Debug, Clone)]
pub struct ScoringModel {
    pub job_profile_id: JobProfileId,
    pub criteria: Vec<WeightedCriterion>,
    pub consistency: ConsistencyReport,
}

impl ScoringModel {
    /// Weights as persisted: rounded to the stored precision.
    pub fn rounded_weights(&self) -> Vec<(CriterionId, f64)> {
        self.criteria
            .iter()
            .map(|c| (c.id, round_weight(c.weight)))
            .collect()
    }

    /// Fetches one candidate's sub-scores, scores them and upserts the record.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the provider knows nothing about the candidate
    /// - `MissingSubScore` if a weighted criterion has no usable sub-score
    /// - `Infrastructure` if the provider or the store fails
    pub async fn score_candidate(
        &self,
        candidate_id: CandidateId,
        sub_scores: &dyn SubScoreProvider,
        scores: &dyn ScoreRepository,
    ) -> Result<ScoreRecord, ScoringError> {
        let raw = sub_scores.fetch(&self.job_profile_id, &candidate_id).await?;

        let card = CandidateScorer::score(&self.criteria, &raw)?;
        let record = ScoreRecord::from_card(
            self.job_profile_id,
            candidate_id,
            card,
            self.consistency.consistency_ratio,
        );

        Ok(scores.upsert(&record).await?)
    }
}

/// Loads criteria and judgments and runs the AHP analysis over them.
#[derive(Clone)]
pub struct ScoringModelLoader {
    criteria: Arc<dyn CriteriaRepository>,
}

impl ScoringModelLoader {
    pub fn new(criteria: Arc<dyn CriteriaRepository>) -> Self {
        Self { criteria }
    }

    /// Builds the matrix and derives weights without judging consistency.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the job profile has no criteria
    /// - Any matrix-level `AhpError`
    pub async fn analyze(
        &self,
        job_profile_id: JobProfileId,
    ) -> Result<ProfileAnalysis, ScoringError> {
        let criteria = self.criteria.find_criteria(&job_profile_id).await?;
        if criteria.is_empty() {
            return Err(ScoringError::job_profile_not_found(job_profile_id));
        }
        let judgments = self.criteria.find_judgments(&job_profile_id).await?;

        let ids: Vec<CriterionId> = criteria.iter().map(|c| c.id).collect();
        let analysis = AhpAnalyzer::analyze(&ids, &judgments)?;

        debug!(
            %job_profile_id,
            criteria = criteria.len(),
            judgments = judgments.len(),
            consistency_ratio = analysis.consistency.consistency_ratio,
            "Derived AHP weights"
        );

        Ok(ProfileAnalysis {
            job_profile_id,
            criteria,
            analysis,
        })
    }

    /// Analyzes the judgments and refuses inconsistent ones.
    pub async fn load(&self, job_profile_id: JobProfileId) -> Result<ScoringModel, ScoringError> {
        self.analyze(job_profile_id).await?.into_model()
    }

    /// Persists the model's weights, rounded to the stored precision.
    pub async fn save_weights(&self, model: &ScoringModel) -> Result<(), ScoringError> {
        self.criteria
            .save_weights(&model.job_profile_id, &model.rounded_weights())
            .await?;
        Ok(())
    }
}
