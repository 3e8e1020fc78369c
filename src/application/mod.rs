//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::scoring::{
    BatchScoringOrchestrator, CalculateScoreCommand, CalculateScoreHandler,
    GetCandidateScoreHandler, GetCandidateScoreQuery, GetTopCandidatesHandler,
    GetTopCandidatesQuery, RefreshScoresCommand, RefreshScoresHandler, RefreshScoresResult,
    ScoreAllCandidatesCommand, ScoreAllCandidatesHandler, ScoringModelLoader,
    ValidateAhpMatrixHandler, ValidateAhpMatrixQuery, ValidateAhpMatrixResult,
};
