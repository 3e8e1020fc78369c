//! Weight Deriver - Priority vector from a pairwise comparison matrix.

use serde::{Deserialize, Serialize};

use super::{AhpError, PairwiseMatrix};
use crate::domain::foundation::CriterionId;

/// Normalized criterion weights, order-correlated with the matrix criteria.
///
/// Every weight is non-negative and the weights sum to 1 (within 1e-9).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityVector {
    criteria: Vec<CriterionId>,
    weights: Vec<f64>,
}

impl PriorityVector {
    /// Number of weights.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn criteria(&self) -> &[CriterionId] {
        &self.criteria
    }

    /// Weight of a specific criterion.
    pub fn weight_of(&self, criterion_id: &CriterionId) -> Option<f64> {
        self.criteria
            .iter()
            .position(|id| id == criterion_id)
            .map(|i| self.weights[i])
    }

    /// Iterates `(criterion, weight)` in matrix order.
    pub fn iter(&self) -> impl Iterator<Item = (&CriterionId, f64)> {
        self.criteria.iter().zip(self.weights.iter().copied())
    }
}

/// Priority vector derivation using the normalized-column-average method.
pub struct WeightDeriver;

impl WeightDeriver {
    /// Derives criterion weights from a comparison matrix.
    ///
    /// # Algorithm
    /// 1. `s[j] = Σ_i m[i][j]`
    /// 2. `m'[i][j] = m[i][j] / s[j]`
    /// 3. `w[i] = (Σ_j m'[i][j]) / n`
    ///
    /// Closed-form and deterministic: the same matrix always yields a
    /// bit-identical vector.
    ///
    /// # Errors
    /// - `DegenerateMatrix` if a column sum is zero or not finite
    pub fn derive(matrix: &PairwiseMatrix) -> Result<PriorityVector, AhpError> {
        let n = matrix.size();
        if n == 0 {
            return Err(AhpError::degenerate("no criteria defined"));
        }

        let column_sums: Vec<f64> = (0..n)
            .map(|j| (0..n).map(|i| matrix.get(i, j)).sum())
            .collect();

        if let Some(j) = column_sums
            .iter()
            .position(|&s| s == 0.0 || !s.is_finite())
        {
            return Err(AhpError::degenerate(format!(
                "column sum for criterion {} is {}",
                matrix.criteria()[j],
                column_sums[j]
            )));
        }

        let weights = (0..n)
            .map(|i| {
                let normalized_row: f64 = (0..n).map(|j| matrix.get(i, j) / column_sums[j]).sum();
                normalized_row / n as f64
            })
            .collect();

        Ok(PriorityVector {
            criteria: matrix.criteria().to_vec(),
            weights,
        })
    }
}
