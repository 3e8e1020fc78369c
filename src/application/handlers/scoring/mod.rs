//! Scoring command and query handlers.
//!
//! One handler per external operation. Batch operations share the
//! `BatchScoringOrchestrator`; every handler that needs weights goes
//! through the `ScoringModelLoader`.

mod orchestrator;
mod scoring_model;

// Command handlers
mod calculate_score;
mod refresh_scores;
mod score_all_candidates;

// Query handlers
mod get_candidate_score;
mod get_top_candidates;
mod validate_ahp_matrix;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use calculate_score::{CalculateScoreCommand, CalculateScoreHandler};
pub use get_candidate_score::{GetCandidateScoreHandler, GetCandidateScoreQuery};
pub use get_top_candidates::{GetTopCandidatesHandler, GetTopCandidatesQuery};
pub use orchestrator::{BatchScoringOrchestrator, ScoringRunKind, DEFAULT_MAX_IN_FLIGHT};
pub use refresh_scores::{RefreshScoresCommand, RefreshScoresHandler, RefreshScoresResult};
pub use score_all_candidates::{ScoreAllCandidatesCommand, ScoreAllCandidatesHandler};
pub use scoring_model::{ProfileAnalysis, ScoringModel, ScoringModelLoader};
pub use validate_ahp_matrix::{
    CriterionWeight, ValidateAhpMatrixHandler, ValidateAhpMatrixQuery, ValidateAhpMatrixResult,
};
