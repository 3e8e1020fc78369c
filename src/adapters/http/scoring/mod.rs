//! HTTP adapter for scoring endpoints.
//!
//! Exposes AHP scoring via REST API:
//! - `POST /api/job-profiles/:id/candidates/:candidate_id/score` - Score one candidate
//! - `GET /api/job-profiles/:id/candidates/:candidate_id/score` - Stored score
//! - `GET /api/job-profiles/:id/top-candidates` - Ranked scores
//! - `POST /api/job-profiles/:id/score-all` - Score every candidate
//! - `POST /api/job-profiles/:id/refresh` - Re-derive weights and rescore
//! - `GET /api/job-profiles/:id/ahp/validate` - Consistency check
//! - `GET /health` - Liveness check

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{ScoringApiError, ScoringAppState};
pub use routes::{scoring_router, scoring_routes};
