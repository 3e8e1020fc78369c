//! Pairwise Matrix - Reciprocal comparison matrix built from judgments.

use serde::Serialize;
use std::collections::HashMap;

use super::{AhpError, CriterionPair, Judgment, JudgmentDefect, SaatyValue};
use crate::domain::foundation::CriterionId;

/// Square reciprocal matrix over the criteria of one job profile.
///
/// Invariants, established by [`PairwiseMatrix::build`]:
/// - `m[i][i] == 1`
/// - `m[j][i] == 1 / m[i][j]`
/// - every entry lies in [1/9, 9]
///
/// Serialize-only: a matrix can only be obtained through `build` or `identity`.
///
/// ```compile_fail
/// use vetterati_scoring::domain::ahp::PairwiseMatrix;
///
/// let _: PairwiseMatrix = serde_json::from_str(r#"{"criteria":[],"entries":[]}"#).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairwiseMatrix {
    criteria: Vec<CriterionId>,
    entries: Vec<Vec<f64>>,
}

impl PairwiseMatrix {
    /// Builds the matrix for `criteria` from a complete judgment set.
    ///
    /// Row/column `i` corresponds to `criteria[i]`.
    ///
    /// # Errors
    ///
    /// - `DegenerateMatrix` if there are no criteria or a criterion is listed twice
    /// - `IncompleteJudgmentSet` for unknown criteria, self comparisons,
    ///   duplicate pairs (in either direction) or missing pairs
    /// - `InvalidJudgmentValue` for a value outside [1/9, 9]
    pub fn build(criteria: &[CriterionId], judgments: &[Judgment]) -> Result<Self, AhpError> {
        let n = criteria.len();
        if n == 0 {
            return Err(AhpError::degenerate("no criteria defined"));
        }

        let mut index = HashMap::with_capacity(n);
        for (i, id) in criteria.iter().enumerate() {
            if index.insert(*id, i).is_some() {
                return Err(AhpError::degenerate(format!(
                    "criterion {} is listed more than once",
                    id
                )));
            }
        }

        let mut unknown = Vec::new();
        let mut self_comparisons = Vec::new();
        let mut duplicates = Vec::new();
        let mut placed: Vec<Option<&Judgment>> = vec![None; n * n];

        for judgment in judgments {
            let pair = CriterionPair::new(judgment.criterion_a, judgment.criterion_b);
            let (a, b) = match (index.get(&pair.first), index.get(&pair.second)) {
                (Some(&a), Some(&b)) => (a, b),
                _ => {
                    unknown.push(pair);
                    continue;
                }
            };
            if a == b {
                self_comparisons.push(pair);
                continue;
            }

            let slot = a.min(b) * n + a.max(b);
            if placed[slot].is_some() {
                duplicates.push(pair);
            } else {
                placed[slot] = Some(judgment);
            }
        }

        if !unknown.is_empty() {
            return Err(AhpError::incomplete(JudgmentDefect::UnknownCriterion, unknown));
        }
        if !self_comparisons.is_empty() {
            return Err(AhpError::incomplete(
                JudgmentDefect::SelfComparison,
                self_comparisons,
            ));
        }
        if !duplicates.is_empty() {
            return Err(AhpError::incomplete(JudgmentDefect::Duplicate, duplicates));
        }

        let missing: Vec<CriterionPair> = upper_triangle(n)
            .filter(|&(i, j)| placed[i * n + j].is_none())
            .map(|(i, j)| CriterionPair::new(criteria[i], criteria[j]))
            .collect();
        if !missing.is_empty() {
            return Err(AhpError::incomplete(JudgmentDefect::Missing, missing));
        }

        let mut entries = vec![vec![1.0; n]; n];
        for judgment in placed.into_iter().flatten() {
            let value = SaatyValue::try_new(judgment.value).ok_or_else(|| {
                AhpError::InvalidJudgmentValue {
                    pair: CriterionPair::new(judgment.criterion_a, judgment.criterion_b),
                    value: judgment.value,
                }
            })?;
            let a = index[&judgment.criterion_a];
            let b = index[&judgment.criterion_b];
            entries[a][b] = value.value();
            entries[b][a] = value.reciprocal();
        }

        Ok(Self {
            criteria: criteria.to_vec(),
            entries,
        })
    }

    /// The n×n identity matrix (every criterion equally important).
    pub fn identity(criteria: &[CriterionId]) -> Self {
        let n = criteria.len();
        Self {
            criteria: criteria.to_vec(),
            entries: vec![vec![1.0; n]; n],
        }
    }

    /// Number of criteria (rows).
    pub fn size(&self) -> usize {
        self.criteria.len()
    }

    /// Criterion order of rows and columns.
    pub fn criteria(&self) -> &[CriterionId] {
        &self.criteria
    }

    /// Entry at row `i`, column `j`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.entries[i][j]
    }

    /// All rows.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.entries
    }
}

/// Index pairs `(i, j)` with `i < j`, row-major.
fn upper_triangle(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).flat_map(move |i| ((i + 1)..n).map(move |j| (i, j)))
}
