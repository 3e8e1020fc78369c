//! HTTP handlers for scoring endpoints.
//!
//! These handlers connect Axum routes to the scoring command/query handlers.

use std::future::Future;
use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use tokio::sync::watch;
use tracing::{error, warn};

use crate::application::handlers::scoring::{
    BatchScoringOrchestrator, CalculateScoreCommand, CalculateScoreHandler,
    GetCandidateScoreHandler, GetCandidateScoreQuery, GetTopCandidatesHandler,
    GetTopCandidatesQuery, RefreshScoresCommand, RefreshScoresHandler,
    ScoreAllCandidatesCommand, ScoreAllCandidatesHandler, ScoringModelLoader,
    ValidateAhpMatrixHandler, ValidateAhpMatrixQuery, DEFAULT_MAX_IN_FLIGHT,
};
use crate::domain::ahp::AhpError;
use crate::domain::foundation::{CandidateId, DomainError, ErrorCode, JobProfileId};
use crate::domain::scoring::{ScoringError, TopCandidatesLimit};
use crate::ports::{CandidateReader, CriteriaRepository, ScoreRepository, SubScoreProvider};

use super::dto::{
    ErrorResponse, HealthResponse, RefreshResponse, ScoreAllResponse, ScoreRecordResponse,
    TopCandidatesParams, TopCandidatesResponse, ValidateMatrixResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct ScoringAppState {
    pub criteria_repository: Arc<dyn CriteriaRepository>,
    pub candidate_reader: Arc<dyn CandidateReader>,
    pub sub_score_provider: Arc<dyn SubScoreProvider>,
    pub score_repository: Arc<dyn ScoreRepository>,
    /// Cap on candidates scored concurrently by batch endpoints.
    pub max_in_flight: usize,
}

impl ScoringAppState {
    pub fn new(
        criteria_repository: Arc<dyn CriteriaRepository>,
        candidate_reader: Arc<dyn CandidateReader>,
        sub_score_provider: Arc<dyn SubScoreProvider>,
        score_repository: Arc<dyn ScoreRepository>,
    ) -> Self {
        Self {
            criteria_repository,
            candidate_reader,
            sub_score_provider,
            score_repository,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
        }
    }

    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight;
        self
    }

    fn model_loader(&self) -> ScoringModelLoader {
        ScoringModelLoader::new(self.criteria_repository.clone())
    }

    fn orchestrator(&self) -> Arc<BatchScoringOrchestrator> {
        Arc::new(
            BatchScoringOrchestrator::new(
                self.model_loader(),
                self.candidate_reader.clone(),
                self.sub_score_provider.clone(),
                self.score_repository.clone(),
            )
            .with_max_in_flight(self.max_in_flight),
        )
    }

    pub fn calculate_score_handler(&self) -> CalculateScoreHandler {
        CalculateScoreHandler::new(
            self.model_loader(),
            self.sub_score_provider.clone(),
            self.score_repository.clone(),
        )
    }

    pub fn get_candidate_score_handler(&self) -> GetCandidateScoreHandler {
        GetCandidateScoreHandler::new(self.score_repository.clone())
    }

    pub fn get_top_candidates_handler(&self) -> GetTopCandidatesHandler {
        GetTopCandidatesHandler::new(self.score_repository.clone())
    }

    pub fn score_all_candidates_handler(&self) -> ScoreAllCandidatesHandler {
        ScoreAllCandidatesHandler::new(self.orchestrator())
    }

    pub fn refresh_scores_handler(&self) -> RefreshScoresHandler {
        RefreshScoresHandler::new(self.orchestrator())
    }

    pub fn validate_ahp_matrix_handler(&self) -> ValidateAhpMatrixHandler {
        ValidateAhpMatrixHandler::new(self.model_loader())
    }
}

fn parse_job_profile_id(raw: &str) -> Result<JobProfileId, ScoringApiError> {
    raw.parse()
        .map_err(|_| ScoringApiError::BadRequest("Invalid job profile ID format".to_string()))
}

fn parse_candidate_id(raw: &str) -> Result<CandidateId, ScoringApiError> {
    raw.parse()
        .map_err(|_| ScoringApiError::BadRequest("Invalid candidate ID format".to_string()))
}

fn parse_limit(raw: Option<&str>) -> Result<i64, ScoringApiError> {
    match raw {
        None => Ok(TopCandidatesLimit::default().get() as i64),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ScoringApiError::BadRequest("limit must be an integer".to_string())),
    }
}

/// Signals cancellation when the request future is dropped.
struct CancelOnDrop(watch::Sender<bool>);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        let _ = self.0.send(true);
    }
}

/// Runs a batch on its own task, cancelling it if the request goes away.
///
/// A request dropped by `TimeoutLayer` or a client disconnect leaves the run
/// to finish as `cancelled` instead of aborting it mid-dispatch.
async fn run_batch<T, F, Fut>(run: F) -> Result<T, ScoringApiError>
where
    F: FnOnce(watch::Receiver<bool>) -> Fut,
    Fut: Future<Output = Result<T, ScoringError>> + Send + 'static,
    T: Send + 'static,
{
    let (cancel_tx, cancel_rx) = watch::channel(false);
    let _cancel_on_drop = CancelOnDrop(cancel_tx);

    let joined = tokio::spawn(run(cancel_rx)).await.map_err(|e| {
        warn!(error = %e, "Batch scoring task did not complete");
        ScoringError::Infrastructure(DomainError::new(
            ErrorCode::InternalError,
            format!("Batch scoring task failed: {}", e),
        ))
    })?;

    Ok(joined?)
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/job-profiles/:job_profile_id/candidates/:candidate_id/score - Score one candidate
pub async fn calculate_score(
    State(state): State<ScoringAppState>,
    Path((job_profile_id, candidate_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ScoringApiError> {
    let cmd = CalculateScoreCommand {
        job_profile_id: parse_job_profile_id(&job_profile_id)?,
        candidate_id: parse_candidate_id(&candidate_id)?,
    };

    let record = state.calculate_score_handler().handle(cmd).await?;

    Ok((StatusCode::OK, Json(ScoreRecordResponse::from(record))))
}

/// POST /api/job-profiles/:job_profile_id/score-all - Score every candidate
pub async fn score_all_candidates(
    State(state): State<ScoringAppState>,
    Path(job_profile_id): Path<String>,
) -> Result<impl IntoResponse, ScoringApiError> {
    let cmd = ScoreAllCandidatesCommand {
        job_profile_id: parse_job_profile_id(&job_profile_id)?,
    };

    let handler = state.score_all_candidates_handler();
    let report = run_batch(move |cancel| async move {
        handler.handle_cancellable(cmd, cancel).await
    })
    .await?;

    Ok((StatusCode::OK, Json(ScoreAllResponse::from(report))))
}

/// POST /api/job-profiles/:job_profile_id/refresh - Re-derive weights and rescore
pub async fn refresh_scores(
    State(state): State<ScoringAppState>,
    Path(job_profile_id): Path<String>,
) -> Result<impl IntoResponse, ScoringApiError> {
    let cmd = RefreshScoresCommand {
        job_profile_id: parse_job_profile_id(&job_profile_id)?,
    };

    let handler = state.refresh_scores_handler();
    let result = run_batch(move |cancel| async move {
        handler.handle_cancellable(cmd, cancel).await
    })
    .await?;

    Ok((StatusCode::OK, Json(RefreshResponse::from(result))))
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/job-profiles/:job_profile_id/candidates/:candidate_id/score - Stored score
pub async fn get_candidate_score(
    State(state): State<ScoringAppState>,
    Path((job_profile_id, candidate_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ScoringApiError> {
    let query = GetCandidateScoreQuery {
        job_profile_id: parse_job_profile_id(&job_profile_id)?,
        candidate_id: parse_candidate_id(&candidate_id)?,
    };

    match state.get_candidate_score_handler().handle(query).await? {
        Some(record) => Ok(Json(ScoreRecordResponse::from(record))),
        None => Err(ScoringApiError::ScoreNotFound(candidate_id)),
    }
}

/// GET /api/job-profiles/:job_profile_id/top-candidates?limit=N - Ranked scores
pub async fn get_top_candidates(
    State(state): State<ScoringAppState>,
    Path(job_profile_id): Path<String>,
    Query(params): Query<TopCandidatesParams>,
) -> Result<impl IntoResponse, ScoringApiError> {
    let job_profile_id = parse_job_profile_id(&job_profile_id)?;
    let query = GetTopCandidatesQuery {
        job_profile_id,
        limit: parse_limit(params.limit.as_deref())?,
    };

    let records = state.get_top_candidates_handler().handle(query).await?;

    Ok(Json(TopCandidatesResponse {
        job_profile_id: job_profile_id.to_string(),
        candidates: records.into_iter().map(ScoreRecordResponse::from).collect(),
    }))
}

/// GET /api/job-profiles/:job_profile_id/ahp/validate - Consistency check
pub async fn validate_ahp_matrix(
    State(state): State<ScoringAppState>,
    Path(job_profile_id): Path<String>,
) -> Result<impl IntoResponse, ScoringApiError> {
    let query = ValidateAhpMatrixQuery {
        job_profile_id: parse_job_profile_id(&job_profile_id)?,
    };

    let result = state.validate_ahp_matrix_handler().handle(query).await?;

    Ok(Json(ValidateMatrixResponse::from(result)))
}

/// GET /health - Liveness check
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts scoring errors to HTTP responses.
#[derive(Debug)]
pub enum ScoringApiError {
    BadRequest(String),
    /// No stored score for the candidate.
    ScoreNotFound(String),
    Scoring(ScoringError),
}

impl From<ScoringError> for ScoringApiError {
    fn from(err: ScoringError) -> Self {
        ScoringApiError::Scoring(err)
    }
}

impl ScoringApiError {
    fn status(&self) -> StatusCode {
        match self {
            ScoringApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ScoringApiError::ScoreNotFound(_) => StatusCode::NOT_FOUND,
            ScoringApiError::Scoring(err) => match err {
                ScoringError::NotFound { .. } => StatusCode::NOT_FOUND,
                ScoringError::InconsistentMatrix { .. } => StatusCode::CONFLICT,
                ScoringError::Ahp(_)
                | ScoringError::MissingSubScore { .. }
                | ScoringError::InvalidLimit { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                ScoringError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn body(&self) -> ErrorResponse {
        match self {
            ScoringApiError::BadRequest(msg) => ErrorResponse::bad_request(msg.clone()),
            ScoringApiError::ScoreNotFound(candidate_id) => ErrorResponse::new(
                ErrorCode::ScoreNotFound.to_string(),
                format!("No score recorded for candidate {}", candidate_id),
            ),
            ScoringApiError::Scoring(err) => scoring_error_body(err),
        }
    }
}

fn scoring_error_body(err: &ScoringError) -> ErrorResponse {
    let response = ErrorResponse::new(err.code().to_string(), err.to_string());
    match err {
        ScoringError::Ahp(AhpError::IncompleteJudgmentSet { defect, pairs }) => {
            response.with_details(json!({ "defect": defect, "pairs": pairs }))
        }
        ScoringError::Ahp(AhpError::InvalidJudgmentValue { pair, value }) => {
            response.with_details(json!({ "pair": pair, "value": value }))
        }
        ScoringError::InconsistentMatrix {
            consistency_ratio, ..
        } => response.with_details(json!({
            "consistency_ratio": consistency_ratio,
            "threshold": crate::domain::ahp::CONSISTENCY_THRESHOLD,
        })),
        ScoringError::MissingSubScore {
            criterion_id,
            criterion_name,
            defect,
        } => response.with_details(json!({
            "criterion_id": criterion_id,
            "criterion_name": criterion_name,
            "defect": defect,
        })),
        ScoringError::Infrastructure(_) => ErrorResponse::internal("An unexpected error occurred"),
        _ => response,
    }
}

impl IntoResponse for ScoringApiError {
    fn into_response(self) -> axum::response::Response {
        if let ScoringApiError::Scoring(ScoringError::Infrastructure(err)) = &self {
            error!(code = %err.code, error = %err.message, "Scoring request failed");
        }
        (self.status(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ahp::{CriterionPair, JudgmentDefect};
    use crate::domain::foundation::{CriterionId, DomainError};
    use crate::domain::scoring::SubScoreDefect;

    #[test]
    fn limit_defaults_when_absent() {
        assert_eq!(parse_limit(None).unwrap(), 10);
        assert_eq!(parse_limit(Some("25")).unwrap(), 25);
    }

    #[test]
    fn non_numeric_limit_is_bad_request() {
        let err = parse_limit(Some("abc")).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.body().code, "BAD_REQUEST");
    }

    #[tokio::test]
    async fn batch_run_returns_its_result() {
        let value = run_batch(|_| async { Ok::<_, ScoringError>(7) }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn dropped_request_cancels_batch_run() {
        let (seen_tx, seen_rx) = tokio::sync::oneshot::channel();
        let request = run_batch(move |mut cancel| async move {
            let cancelled = cancel.wait_for(|c| *c).await.is_ok();
            let _ = seen_tx.send(cancelled);
            Ok::<_, ScoringError>(())
        });

        tokio::select! {
            biased;
            _ = request => panic!("batch run finished before cancellation"),
            _ = tokio::task::yield_now() => {}
        }

        assert!(seen_rx.await.unwrap());
    }

    #[tokio::test]
    async fn panicked_batch_run_is_internal_error() {
        let err = run_batch(|_| async {
            if true {
                panic!("scorer crashed");
            }
            Ok::<(), ScoringError>(())
        })
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body().code, "INTERNAL_ERROR");
    }

    #[test]
    fn bad_request_maps_to_400() {
        let err = ScoringApiError::BadRequest("Invalid job profile ID format".to_string());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.body().code, "BAD_REQUEST");
    }

    #[test]
    fn not_found_maps_to_404() {
        let err: ScoringApiError = ScoringError::job_profile_not_found(JobProfileId::new()).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.body().code, "JOB_PROFILE_NOT_FOUND");
    }

    #[test]
    fn missing_score_maps_to_404() {
        let err = ScoringApiError::ScoreNotFound(CandidateId::new().to_string());
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.body().code, "SCORE_NOT_FOUND");
    }

    #[test]
    fn inconsistent_matrix_maps_to_409_with_ratio() {
        let err: ScoringApiError = ScoringError::InconsistentMatrix {
            job_profile_id: JobProfileId::new(),
            consistency_ratio: 0.42,
        }
        .into();

        assert_eq!(err.status(), StatusCode::CONFLICT);
        let body = err.body();
        assert_eq!(body.code, "INCONSISTENT_MATRIX");
        assert_eq!(body.details.unwrap()["consistency_ratio"], 0.42);
    }

    #[test]
    fn incomplete_judgments_list_offending_pairs() {
        let pair = CriterionPair::new(CriterionId::new(), CriterionId::new());
        let err: ScoringApiError = ScoringError::from(AhpError::incomplete(
            JudgmentDefect::Missing,
            vec![pair],
        ))
        .into();

        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let details = err.body().details.unwrap();
        assert_eq!(details["defect"], "missing");
        assert_eq!(details["pairs"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn missing_sub_score_maps_to_422() {
        let err: ScoringApiError = ScoringError::MissingSubScore {
            criterion_id: CriterionId::new(),
            criterion_name: "skills".to_string(),
            defect: SubScoreDefect::Absent,
        }
        .into();

        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.body().details.unwrap()["criterion_name"], "skills");
    }

    #[test]
    fn invalid_limit_maps_to_422() {
        let err: ScoringApiError = TopCandidatesLimit::try_new(0).unwrap_err().into();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.body().code, "INVALID_LIMIT");
    }

    #[test]
    fn infrastructure_errors_hide_internals() {
        let err: ScoringApiError =
            ScoringError::from(DomainError::database("connection refused")).into();

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = err.body();
        assert_eq!(body.code, "INTERNAL_ERROR");
        assert!(!body.message.contains("connection refused"));
    }
}
