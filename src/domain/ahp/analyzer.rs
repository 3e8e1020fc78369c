//! AHP Analyzer - Judgments to validated weights in one step.

use serde::Serialize;

use super::{
    AhpError, ConsistencyChecker, ConsistencyReport, Judgment, PairwiseMatrix, PriorityVector,
    WeightDeriver,
};
use crate::domain::foundation::CriterionId;

/// Everything derived from one job profile's judgments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AhpAnalysis {
    pub matrix: PairwiseMatrix,
    pub priorities: PriorityVector,
    pub consistency: ConsistencyReport,
}

/// Runs matrix construction, weight derivation and the consistency check.
pub struct AhpAnalyzer;

impl AhpAnalyzer {
    /// Analyzes a criterion set and its judgments.
    ///
    /// An inconsistent matrix is not an error here; callers decide whether
    /// `consistency.is_consistent == false` blocks them.
    ///
    /// # Edge Cases
    /// - One criterion: identity matrix, weight 1.0, consistency check skipped
    pub fn analyze(
        criteria: &[CriterionId],
        judgments: &[Judgment],
    ) -> Result<AhpAnalysis, AhpError> {
        let matrix = PairwiseMatrix::build(criteria, judgments)?;
        let priorities = WeightDeriver::derive(&matrix)?;

        let consistency = if matrix.size() == 1 {
            ConsistencyReport::perfect(1)
        } else {
            ConsistencyChecker::check(&matrix, &priorities)?
        };

        Ok(AhpAnalysis {
            matrix,
            priorities,
            consistency,
        })
    }
}
