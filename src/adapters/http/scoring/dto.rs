//! HTTP DTOs (Data Transfer Objects) for scoring endpoints.
//!
//! These types define the JSON request/response structure for the scoring API.
//! They serve as the boundary between HTTP and the application layer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::application::handlers::scoring::{RefreshScoresResult, ValidateAhpMatrixResult};
use crate::domain::scoring::{BatchScoringReport, CandidateFailure, ScoreRecord, ScoringRunStatus};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Query string for the top-candidates endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TopCandidatesParams {
    /// Page size in 1..=100; defaults to 10.
    ///
    /// Kept as text so a non-numeric value gets the JSON error body.
    pub limit: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// One line of a score breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContributionResponse {
    pub criterion_id: String,
    pub weight: f64,
    pub sub_score: f64,
    pub contribution: f64,
}

/// A stored candidate score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreRecordResponse {
    pub id: String,
    pub job_profile_id: String,
    pub candidate_id: String,
    pub overall_score: f64,
    pub match_percentage: u8,
    pub breakdown: BTreeMap<String, ContributionResponse>,
    pub consistency_ratio: f64,
    pub methodology: String,
    pub scored_at: String,
}

impl From<ScoreRecord> for ScoreRecordResponse {
    fn from(record: ScoreRecord) -> Self {
        let breakdown = record
            .breakdown
            .iter()
            .map(|(name, line)| {
                (
                    name.clone(),
                    ContributionResponse {
                        criterion_id: line.criterion_id.to_string(),
                        weight: line.weight,
                        sub_score: line.sub_score,
                        contribution: line.contribution,
                    },
                )
            })
            .collect();

        Self {
            id: record.id.to_string(),
            job_profile_id: record.job_profile_id.to_string(),
            candidate_id: record.candidate_id.to_string(),
            overall_score: record.overall_score,
            match_percentage: record.match_percentage,
            breakdown,
            consistency_ratio: record.consistency_ratio,
            methodology: record.methodology,
            scored_at: record.scored_at.to_string(),
        }
    }
}

/// Ranked scores for a job profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopCandidatesResponse {
    pub job_profile_id: String,
    pub candidates: Vec<ScoreRecordResponse>,
}

/// A candidate that could not be scored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateFailureResponse {
    pub candidate_id: String,
    pub code: String,
    pub message: String,
}

impl From<CandidateFailure> for CandidateFailureResponse {
    fn from(failure: CandidateFailure) -> Self {
        Self {
            candidate_id: failure.candidate_id.to_string(),
            code: failure.code,
            message: failure.message,
        }
    }
}

/// Summary of a score-all run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreAllResponse {
    pub job_profile_id: String,
    pub status: ScoringRunStatus,
    pub candidates_scored: usize,
    pub average_score: f64,
    pub highest_score: Option<f64>,
    pub lowest_score: Option<f64>,
    pub failures: usize,
    pub failed_candidates: Vec<CandidateFailureResponse>,
    pub skipped: usize,
    pub success: bool,
    pub processed_at: String,
}

impl From<BatchScoringReport> for ScoreAllResponse {
    fn from(report: BatchScoringReport) -> Self {
        Self {
            job_profile_id: report.job_profile_id.to_string(),
            status: report.status,
            candidates_scored: report.candidates_scored,
            average_score: report.average_score,
            highest_score: report.highest_score,
            lowest_score: report.lowest_score,
            failures: report.failures,
            failed_candidates: report
                .failed_candidates
                .into_iter()
                .map(CandidateFailureResponse::from)
                .collect(),
            skipped: report.skipped,
            success: report.success,
            processed_at: report.processed_at.to_string(),
        }
    }
}

/// Outcome of a refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub success: bool,
    pub refreshed_at: String,
    pub candidates_scored: usize,
    pub failures: usize,
}

impl From<RefreshScoresResult> for RefreshResponse {
    fn from(result: RefreshScoresResult) -> Self {
        Self {
            success: result.success,
            refreshed_at: result.refreshed_at.to_string(),
            candidates_scored: result.report.candidates_scored,
            failures: result.report.failures,
        }
    }
}

/// Derived weight of one criterion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionWeightResponse {
    pub criterion_id: String,
    pub name: String,
    pub weight: f64,
}

/// Consistency verdict for a job profile's judgments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateMatrixResponse {
    pub job_profile_id: String,
    pub is_consistent: bool,
    pub consistency_ratio: f64,
    pub consistency_index: f64,
    pub lambda_max: f64,
    pub weights: Vec<CriterionWeightResponse>,
    pub validated_at: String,
}

impl From<ValidateAhpMatrixResult> for ValidateMatrixResponse {
    fn from(result: ValidateAhpMatrixResult) -> Self {
        Self {
            job_profile_id: result.job_profile_id.to_string(),
            is_consistent: result.is_consistent,
            consistency_ratio: result.consistency_ratio,
            consistency_index: result.consistency_index,
            lambda_max: result.lambda_max,
            weights: result
                .weights
                .into_iter()
                .map(|w| CriterionWeightResponse {
                    criterion_id: w.criterion_id.to_string(),
                    name: w.name,
                    weight: w.weight,
                })
                .collect(),
            validated_at: result.validated_at.to_string(),
        }
    }
}

/// Liveness check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}
