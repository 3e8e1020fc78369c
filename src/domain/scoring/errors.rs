//! Scoring-specific error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::domain::ahp::AhpError;
use crate::domain::foundation::{CriterionId, DomainError, ErrorCode, JobProfileId};

/// Why a candidate's sub-score could not be used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SubScoreDefect {
    /// The provider returned nothing for the criterion.
    Absent,
    /// The provider returned a value outside [0, 1] (or not a number).
    OutOfRange { value: f64 },
}

impl fmt::Display for SubScoreDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubScoreDefect::Absent => write!(f, "absent"),
            SubScoreDefect::OutOfRange { value } => write!(f, "out of range [0, 1]: {}", value),
        }
    }
}

/// Kind of resource a `NotFound` error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    JobProfile,
    Candidate,
    ScoreRecord,
}

impl Resource {
    fn code(&self) -> ErrorCode {
        match self {
            Resource::JobProfile => ErrorCode::JobProfileNotFound,
            Resource::Candidate => ErrorCode::CandidateNotFound,
            Resource::ScoreRecord => ErrorCode::ScoreNotFound,
        }
    }

    fn from_code(code: ErrorCode) -> Self {
        match code {
            ErrorCode::CandidateNotFound => Resource::Candidate,
            ErrorCode::ScoreNotFound => Resource::ScoreRecord,
            _ => Resource::JobProfile,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Resource::JobProfile => "Job profile",
            Resource::Candidate => "Candidate",
            Resource::ScoreRecord => "Score record",
        };
        write!(f, "{}", s)
    }
}

/// Errors surfaced by scoring operations.
#[derive(Debug, Clone, Error)]
pub enum ScoringError {
    /// Matrix-level failure; aborts a whole run.
    #[error(transparent)]
    Ahp(#[from] AhpError),

    /// Scoring refused because the judgments fail the consistency check.
    #[error(
        "Judgments for job profile {job_profile_id} are inconsistent \
         (CR = {consistency_ratio:.4} exceeds 0.10)"
    )]
    InconsistentMatrix {
        job_profile_id: JobProfileId,
        consistency_ratio: f64,
    },

    /// A weighted criterion has no usable sub-score; aborts one candidate.
    #[error("Sub-score for criterion '{criterion_name}' ({criterion_id}) is {defect}")]
    MissingSubScore {
        criterion_id: CriterionId,
        criterion_name: String,
        defect: SubScoreDefect,
    },

    #[error("Limit must be between 1 and {max}, got {limit}")]
    InvalidLimit { limit: i64, max: usize },

    #[error("{resource} not found: {id}")]
    NotFound { resource: Resource, id: String },

    /// Unexpected collaborator failure (store or provider unavailable).
    #[error("{0}")]
    Infrastructure(DomainError),
}

impl ScoringError {
    pub fn job_profile_not_found(id: JobProfileId) -> Self {
        ScoringError::NotFound {
            resource: Resource::JobProfile,
            id: id.to_string(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ScoringError::Ahp(e) => e.code(),
            ScoringError::InconsistentMatrix { .. } => ErrorCode::InconsistentMatrix,
            ScoringError::MissingSubScore { .. } => ErrorCode::MissingSubScore,
            ScoringError::InvalidLimit { .. } => ErrorCode::InvalidLimit,
            ScoringError::NotFound { resource, .. } => resource.code(),
            ScoringError::Infrastructure(e) => e.code,
        }
    }

    /// True for errors that abort the whole run rather than one candidate.
    pub fn is_matrix_level(&self) -> bool {
        matches!(
            self,
            ScoringError::Ahp(_) | ScoringError::InconsistentMatrix { .. }
        )
    }
}

impl From<DomainError> for ScoringError {
    fn from(err: DomainError) -> Self {
        if err.code.is_not_found() {
            let id = err
                .details
                .get("id")
                .cloned()
                .unwrap_or_else(|| err.message.clone());
            return ScoringError::NotFound {
                resource: Resource::from_code(err.code),
                id,
            };
        }
        ScoringError::Infrastructure(err)
    }
}
