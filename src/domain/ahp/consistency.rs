//! Consistency Checker - Saaty consistency ratio of a judgment matrix.

use serde::{Deserialize, Serialize};

use super::{AhpError, PairwiseMatrix, PriorityVector};

/// Judgments with a consistency ratio above this are rejected for scoring.
pub const CONSISTENCY_THRESHOLD: f64 = 0.10;

/// Largest matrix size with a tabulated Random Index.
pub const MAX_TABULATED_CRITERIA: usize = 15;

/// Saaty's Random Index, indexed by `n - 1`.
const RANDOM_INDEX: [f64; MAX_TABULATED_CRITERIA] = [
    0.00, 0.00, 0.58, 0.90, 1.12, 1.24, 1.32, 1.41, 1.45, 1.49, 1.51, 1.48, 1.56, 1.57, 1.59,
];

/// Random Index for a matrix of size `n`, if tabulated.
pub fn random_index(n: usize) -> Option<f64> {
    if n == 0 {
        return None;
    }
    RANDOM_INDEX.get(n - 1).copied()
}

/// Result of a consistency check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    /// Estimated principal eigenvalue.
    pub lambda_max: f64,
    /// `(λmax − n) / (n − 1)`.
    pub consistency_index: f64,
    /// `CI / RI(n)`.
    pub consistency_ratio: f64,
    pub is_consistent: bool,
}

impl ConsistencyReport {
    /// Report for matrices that cannot be inconsistent (n < 3).
    pub fn perfect(n: usize) -> Self {
        Self {
            lambda_max: n as f64,
            consistency_index: 0.0,
            consistency_ratio: 0.0,
            is_consistent: true,
        }
    }
}

/// Consistency ratio computation.
pub struct ConsistencyChecker;

impl ConsistencyChecker {
    /// Computes λmax, CI and CR for a matrix and its priority vector.
    ///
    /// # Algorithm
    /// 1. `λmax = (1/n) Σ_i [(Σ_j m[i][j] · w[j]) / w[i]]`
    /// 2. `CI = (λmax − n) / (n − 1)`
    /// 3. `CR = CI / RI(n)`; consistent iff `CR ≤ 0.10`
    ///
    /// # Edge Cases
    /// - n < 3: always consistent (CR = 0)
    /// - n > 15: `UnsupportedCriterionCount`, no extrapolation of RI
    /// - floating-point noise can push λmax a hair below n; CI is floored at 0
    pub fn check(
        matrix: &PairwiseMatrix,
        priorities: &PriorityVector,
    ) -> Result<ConsistencyReport, AhpError> {
        let n = matrix.size();
        if n > MAX_TABULATED_CRITERIA {
            return Err(AhpError::UnsupportedCriterionCount {
                count: n,
                max: MAX_TABULATED_CRITERIA,
            });
        }
        if priorities.len() != n {
            return Err(AhpError::degenerate(format!(
                "priority vector has {} entries for a {}x{} matrix",
                priorities.len(),
                n,
                n
            )));
        }
        if n < 3 {
            return Ok(ConsistencyReport::perfect(n));
        }

        let w = priorities.weights();
        if let Some(i) = w.iter().position(|&x| x <= 0.0 || !x.is_finite()) {
            return Err(AhpError::degenerate(format!(
                "priority of criterion {} is {}",
                matrix.criteria()[i],
                w[i]
            )));
        }

        let lambda_max = (0..n)
            .map(|i| {
                let weighted_sum: f64 = (0..n).map(|j| matrix.get(i, j) * w[j]).sum();
                weighted_sum / w[i]
            })
            .sum::<f64>()
            / n as f64;

        let consistency_index = ((lambda_max - n as f64) / (n as f64 - 1.0)).max(0.0);
        // n is within 3..=15 here, so the table always has an entry.
        let ri = random_index(n).unwrap_or(f64::NAN);
        let consistency_ratio = consistency_index / ri;

        Ok(ConsistencyReport {
            lambda_max,
            consistency_index,
            consistency_ratio,
            is_consistent: consistency_ratio <= CONSISTENCY_THRESHOLD,
        })
    }
}
