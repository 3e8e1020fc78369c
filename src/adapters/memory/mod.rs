//! In-memory adapters for tests and local runs.
//!
//! - `InMemoryScoringStore` - Criteria, judgments, candidates and score records
//! - `StaticSubScoreProvider` - Fixed sub-scores per (job profile, candidate)

mod store;
mod sub_scores;

pub use store::InMemoryScoringStore;
pub use sub_scores::StaticSubScoreProvider;
