//! Axum router configuration for scoring endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    calculate_score, get_candidate_score, get_top_candidates, health, refresh_scores,
    score_all_candidates, validate_ahp_matrix, ScoringAppState,
};

/// Create the job-profile scoring router.
///
/// # Routes
/// - `POST /:job_profile_id/candidates/:candidate_id/score` - Score one candidate
/// - `GET /:job_profile_id/candidates/:candidate_id/score` - Stored score
/// - `GET /:job_profile_id/top-candidates` - Ranked scores (`?limit=`, default 10)
/// - `POST /:job_profile_id/score-all` - Score every candidate
/// - `POST /:job_profile_id/refresh` - Re-derive weights and rescore
/// - `GET /:job_profile_id/ahp/validate` - Consistency check
pub fn scoring_routes() -> Router<ScoringAppState> {
    Router::new()
        .route(
            "/:job_profile_id/candidates/:candidate_id/score",
            post(calculate_score).get(get_candidate_score),
        )
        .route("/:job_profile_id/top-candidates", get(get_top_candidates))
        .route("/:job_profile_id/score-all", post(score_all_candidates))
        .route("/:job_profile_id/refresh", post(refresh_scores))
        .route("/:job_profile_id/ahp/validate", get(validate_ahp_matrix))
}

/// Create the complete scoring module router.
///
/// Mounts the scoring routes at `/api/job-profiles` and adds `GET /health`.
///
/// # Example
///
/// ```ignore
/// let app = scoring_router().with_state(state);
/// ```
pub fn scoring_router() -> Router<ScoringAppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api/job-profiles", scoring_routes())
}
