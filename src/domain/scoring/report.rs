//! Batch scoring report.

use serde::{Deserialize, Serialize};

use super::{ScoringError, ScoringRunStatus};
use crate::domain::ahp::ConsistencyReport;
use crate::domain::foundation::{CandidateId, JobProfileId, Timestamp};

/// One candidate that could not be scored during a batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateFailure {
    pub candidate_id: CandidateId,
    pub code: String,
    pub message: String,
}

impl CandidateFailure {
    pub fn new(candidate_id: CandidateId, error: &ScoringError) -> Self {
        Self {
            candidate_id,
            code: error.code().to_string(),
            message: error.to_string(),
        }
    }
}

/// Summary of one batch scoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchScoringReport {
    pub job_profile_id: JobProfileId,
    pub status: ScoringRunStatus,
    pub candidates_scored: usize,
    pub failures: usize,
    pub failed_candidates: Vec<CandidateFailure>,
    /// Candidates never dispatched because the run was cancelled.
    pub skipped: usize,
    /// Mean over successfully scored candidates only; 0 when none.
    pub average_score: f64,
    pub highest_score: Option<f64>,
    pub lowest_score: Option<f64>,
    /// True when at least one candidate was scored, or there was nothing to fail.
    pub success: bool,
    /// Absent when the run was cancelled before validation.
    pub consistency: Option<ConsistencyReport>,
    pub processed_at: Timestamp,
}

impl BatchScoringReport {
    /// Builds the summary from the collected outcomes of a run.
    pub fn summarize(
        job_profile_id: JobProfileId,
        status: ScoringRunStatus,
        consistency: Option<ConsistencyReport>,
        scores: &[f64],
        failed_candidates: Vec<CandidateFailure>,
        skipped: usize,
    ) -> Self {
        let candidates_scored = scores.len();
        let failures = failed_candidates.len();
        let average_score = if scores.is_empty() {
            0.0
        } else {
            scores.iter().sum::<f64>() / candidates_scored as f64
        };
        let highest_score = scores.iter().copied().reduce(f64::max);
        let lowest_score = scores.iter().copied().reduce(f64::min);

        Self {
            job_profile_id,
            status,
            candidates_scored,
            failures,
            failed_candidates,
            skipped,
            average_score,
            highest_score,
            lowest_score,
            success: candidates_scored > 0 || failures == 0,
            consistency,
            processed_at: Timestamp::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::CriterionId;
    use crate::domain::scoring::SubScoreDefect;

    fn failure() -> CandidateFailure {
        CandidateFailure::new(
            CandidateId::new(),
            &ScoringError::MissingSubScore {
                criterion_id: CriterionId::new(),
                criterion_name: "skills".to_string(),
                defect: SubScoreDefect::Absent,
            },
        )
    }

    #[test]
    fn average_covers_scored_candidates_only() {
        let report = BatchScoringReport::summarize(
            JobProfileId::new(),
            ScoringRunStatus::Completed,
            Some(ConsistencyReport::perfect(3)),
            &[0.8, 0.6, 0.4, 0.2],
            vec![failure()],
            0,
        );

        assert_eq!(report.candidates_scored, 4);
        assert_eq!(report.failures, 1);
        assert!((report.average_score - 0.5).abs() < 1e-12);
        assert_eq!(report.highest_score, Some(0.8));
        assert_eq!(report.lowest_score, Some(0.2));
        assert!(report.success);
    }

    #[test]
    fn empty_run_succeeds_with_zero_average() {
        let report = BatchScoringReport::summarize(
            JobProfileId::new(),
            ScoringRunStatus::Completed,
            Some(ConsistencyReport::perfect(2)),
            &[],
            vec![],
            0,
        );

        assert_eq!(report.candidates_scored, 0);
        assert_eq!(report.average_score, 0.0);
        assert_eq!(report.highest_score, None);
        assert!(report.success);
    }

    #[test]
    fn all_failed_is_not_success() {
        let report = BatchScoringReport::summarize(
            JobProfileId::new(),
            ScoringRunStatus::Completed,
            Some(ConsistencyReport::perfect(2)),
            &[],
            vec![failure(), failure()],
            0,
        );

        assert_eq!(report.failures, 2);
        assert!(!report.success);
    }

    #[test]
    fn failure_records_code_and_message() {
        let f = failure();
        assert_eq!(f.code, "MISSING_SUB_SCORE");
        assert!(f.message.contains("skills"));
    }
}
