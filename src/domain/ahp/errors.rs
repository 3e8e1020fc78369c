//! AHP matrix-level errors.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::domain::foundation::{CriterionId, ErrorCode};

/// An ordered pair of criteria as it appears in a judgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CriterionPair {
    pub first: CriterionId,
    pub second: CriterionId,
}

impl CriterionPair {
    pub fn new(first: CriterionId, second: CriterionId) -> Self {
        Self { first, second }
    }
}

impl fmt::Display for CriterionPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}

/// What is structurally wrong with a judgment set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JudgmentDefect {
    /// No judgment exists for an unordered criterion pair.
    Missing,
    /// More than one judgment covers the same unordered pair.
    Duplicate,
    /// A judgment compares a criterion with itself.
    SelfComparison,
    /// A judgment references a criterion outside the job profile.
    UnknownCriterion,
}

impl fmt::Display for JudgmentDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JudgmentDefect::Missing => "missing judgment",
            JudgmentDefect::Duplicate => "duplicate judgment",
            JudgmentDefect::SelfComparison => "self comparison",
            JudgmentDefect::UnknownCriterion => "unknown criterion",
        };
        write!(f, "{}", s)
    }
}

/// Errors raised while building, weighting or checking a comparison matrix.
///
/// Any of these aborts a whole scoring run: the weights they would have
/// produced are shared by every candidate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AhpError {
    #[error("Judgment set is incomplete: {defect} for {} pair(s)", pairs.len())]
    IncompleteJudgmentSet {
        defect: JudgmentDefect,
        pairs: Vec<CriterionPair>,
    },

    #[error("Judgment value {value} for {pair} is outside the Saaty scale [1/9, 9]")]
    InvalidJudgmentValue { pair: CriterionPair, value: f64 },

    #[error("Comparison matrix is degenerate: {reason}")]
    DegenerateMatrix { reason: String },

    #[error("Consistency can be checked for at most {max} criteria, got {count}")]
    UnsupportedCriterionCount { count: usize, max: usize },
}

impl AhpError {
    pub fn incomplete(defect: JudgmentDefect, pairs: Vec<CriterionPair>) -> Self {
        AhpError::IncompleteJudgmentSet { defect, pairs }
    }

    pub fn degenerate(reason: impl Into<String>) -> Self {
        AhpError::DegenerateMatrix {
            reason: reason.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AhpError::IncompleteJudgmentSet { .. } => ErrorCode::IncompleteJudgmentSet,
            AhpError::InvalidJudgmentValue { .. } => ErrorCode::InvalidJudgmentValue,
            AhpError::DegenerateMatrix { .. } => ErrorCode::DegenerateMatrix,
            AhpError::UnsupportedCriterionCount { .. } => ErrorCode::UnsupportedCriterionCount,
        }
    }
}
