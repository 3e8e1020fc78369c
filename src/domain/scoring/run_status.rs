//! ScoringRunStatus enum for tracking a batch scoring run.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Lifecycle status of one batch scoring run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScoringRunStatus {
    #[default]
    Pending,
    /// Building the matrix and checking consistency.
    Validating,
    /// Dispatching candidates.
    Scoring,
    Completed,
    /// A matrix-level error aborted the run before any candidate was scored.
    Failed,
    Cancelled,
}

impl ScoringRunStatus {
    /// Returns true once the run can no longer change.
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            ScoringRunStatus::Completed | ScoringRunStatus::Failed | ScoringRunStatus::Cancelled
        )
    }
}

impl StateMachine for ScoringRunStatus {
    /// Valid transitions:
    /// - Pending -> Validating | Failed | Cancelled
    /// - Validating -> Scoring | Failed | Cancelled
    /// - Scoring -> Completed | Cancelled
    fn can_transition_to(&self, target: &Self) -> bool {
        use ScoringRunStatus::*;
        matches!(
            (self, target),
            (Pending, Validating)
                | (Pending, Failed)
                | (Pending, Cancelled)
                | (Validating, Scoring)
                | (Validating, Failed)
                | (Validating, Cancelled)
                | (Scoring, Completed)
                | (Scoring, Cancelled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ScoringRunStatus::*;
        match self {
            Pending => vec![Validating, Failed, Cancelled],
            Validating => vec![Scoring, Failed, Cancelled],
            Scoring => vec![Completed, Cancelled],
            Completed | Failed | Cancelled => vec![],
        }
    }
}

impl fmt::Display for ScoringRunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScoringRunStatus::Pending => "Pending",
            ScoringRunStatus::Validating => "Validating",
            ScoringRunStatus::Scoring => "Scoring",
            ScoringRunStatus::Completed => "Completed",
            ScoringRunStatus::Failed => "Failed",
            ScoringRunStatus::Cancelled => "Cancelled",
        };
        write!(f, "{}", s)
    }
}
