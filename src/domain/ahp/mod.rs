//! AHP Module - Analytic Hierarchy Process weight derivation.
//!
//! Pure, stateless functions over explicit value types:
//!
//! - `PairwiseMatrix` - Reciprocal comparison matrix built from judgments
//! - `WeightDeriver` - Normalized-column-average priority vector
//! - `ConsistencyChecker` - λmax, CI and CR against Saaty's Random Index
//! - `AhpAnalyzer` - The three steps above in one call
//!
//! Nothing here performs I/O; loading judgments and persisting weights is
//! the application layer's job.

mod analyzer;
mod consistency;
mod criterion;
mod errors;
mod pairwise_matrix;
mod weight_deriver;

pub use analyzer::{AhpAnalysis, AhpAnalyzer};
pub use consistency::{
    random_index, ConsistencyChecker, ConsistencyReport, CONSISTENCY_THRESHOLD,
    MAX_TABULATED_CRITERIA,
};
pub use criterion::{
    round_weight, Criterion, Judgment, SaatyValue, SAATY_MAX, SAATY_MIN, WEIGHT_DECIMALS,
};
pub use errors::{AhpError, CriterionPair, JudgmentDefect};
pub use pairwise_matrix::PairwiseMatrix;
pub use weight_deriver::{PriorityVector, WeightDeriver};
