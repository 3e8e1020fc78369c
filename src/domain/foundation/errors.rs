//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

use super::CandidateId;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    InvalidLimit,

    // Not found errors
    JobProfileNotFound,
    CandidateNotFound,
    ScoreNotFound,

    // AHP matrix errors
    IncompleteJudgmentSet,
    InvalidJudgmentValue,
    DegenerateMatrix,
    UnsupportedCriterionCount,
    InconsistentMatrix,

    // Scoring errors
    MissingSubScore,

    // State errors
    InvalidStateTransition,

    // External collaborator errors
    SubScoreProviderError,

    // Infrastructure errors
    DatabaseError,
    InternalError,
}

impl ErrorCode {
    /// Returns true for the "resource does not exist" family of codes.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ErrorCode::JobProfileNotFound | ErrorCode::CandidateNotFound | ErrorCode::ScoreNotFound
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidLimit => "INVALID_LIMIT",
            ErrorCode::JobProfileNotFound => "JOB_PROFILE_NOT_FOUND",
            ErrorCode::CandidateNotFound => "CANDIDATE_NOT_FOUND",
            ErrorCode::ScoreNotFound => "SCORE_NOT_FOUND",
            ErrorCode::IncompleteJudgmentSet => "INCOMPLETE_JUDGMENT_SET",
            ErrorCode::InvalidJudgmentValue => "INVALID_JUDGMENT_VALUE",
            ErrorCode::DegenerateMatrix => "DEGENERATE_MATRIX",
            ErrorCode::UnsupportedCriterionCount => "UNSUPPORTED_CRITERION_COUNT",
            ErrorCode::InconsistentMatrix => "INCONSISTENT_MATRIX",
            ErrorCode::MissingSubScore => "MISSING_SUB_SCORE",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::SubScoreProviderError => "SUB_SCORE_PROVIDER_ERROR",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
///
/// Ports report collaborator failures with this type.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Creates a not-found error for a candidate, carrying its id as the `id` detail.
    pub fn candidate_not_found(candidate_id: &CandidateId) -> Self {
        Self::new(
            ErrorCode::CandidateNotFound,
            format!("No sub-scores for candidate {}", candidate_id),
        )
        .with_detail("id", candidate_id.to_string())
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_invalid_format_displays_correctly() {
        let err = ValidationError::invalid_format("status", "cannot go back");
        assert_eq!(format!("{}", err), "Field 'status' has invalid format: cannot go back");
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::CandidateNotFound, "Candidate not found");
        assert_eq!(format!("{}", err), "[CANDIDATE_NOT_FOUND] Candidate not found");
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::database("insert failed").with_detail("table", "candidate_scores");
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.details.get("table"), Some(&"candidate_scores".to_string()));
    }

    #[test]
    fn candidate_not_found_carries_id_detail() {
        let candidate = CandidateId::new();
        let err = DomainError::candidate_not_found(&candidate);
        assert_eq!(err.code, ErrorCode::CandidateNotFound);
        assert_eq!(err.details.get("id"), Some(&candidate.to_string()));
    }

    #[test]
    fn not_found_family_is_detected() {
        assert!(ErrorCode::JobProfileNotFound.is_not_found());
        assert!(ErrorCode::CandidateNotFound.is_not_found());
        assert!(!ErrorCode::DatabaseError.is_not_found());
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::IncompleteJudgmentSet), "INCOMPLETE_JUDGMENT_SET");
        assert_eq!(format!("{}", ErrorCode::InconsistentMatrix), "INCONSISTENT_MATRIX");
    }
}
