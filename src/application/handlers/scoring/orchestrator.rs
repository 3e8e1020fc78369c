//! BatchScoringOrchestrator - Scores every candidate of a job profile.
//!
//! A run walks `Pending → Validating → Scoring → Completed`. Weights are
//! derived and validated once, before any candidate is dispatched, and
//! shared read-only by all candidate tasks.
//!
//! # Concurrency
//!
//! At most `max_in_flight` candidates are scored at once. A semaphore
//! permit is acquired before each task is spawned and released when the
//! task ends. Each task upserts its own record; tasks never wait on each
//! other.
//!
//! # Cancellation
//!
//! The run watches a `watch::Receiver<bool>`. Once it reads `true`, no
//! further candidate is dispatched; tasks already running are awaited and
//! counted, and the run ends `Cancelled`.

use std::sync::Arc;

use tokio::sync::{watch, Semaphore};
use tracing::{debug, info, warn};

use super::scoring_model::{ScoringModel, ScoringModelLoader};
use crate::domain::foundation::{CandidateId, DomainError, ErrorCode, JobProfileId, StateMachine};
use crate::domain::scoring::{BatchScoringReport, CandidateFailure, ScoringError, ScoringRunStatus};
use crate::ports::{CandidateReader, ScoreRepository, SubScoreProvider};

/// Default cap on concurrently scored candidates.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 8;

/// What a run does before scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringRunKind {
    /// Score with the weights derived from the current judgments.
    ScoreAll,
    /// Same, but persist the re-derived weights first.
    Refresh,
}

/// Runs batch scoring for one job profile at a time.
pub struct BatchScoringOrchestrator {
    loader: ScoringModelLoader,
    candidates: Arc<dyn CandidateReader>,
    sub_scores: Arc<dyn SubScoreProvider>,
    scores: Arc<dyn ScoreRepository>,
    max_in_flight: usize,
}

impl BatchScoringOrchestrator {
    pub fn new(
        loader: ScoringModelLoader,
        candidates: Arc<dyn CandidateReader>,
        sub_scores: Arc<dyn SubScoreProvider>,
        scores: Arc<dyn ScoreRepository>,
    ) -> Self {
        Self {
            loader,
            candidates,
            sub_scores,
            scores,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
        }
    }

    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight.max(1);
        self
    }

    /// Runs a batch to completion or cancellation.
    ///
    /// # Errors
    ///
    /// Matrix-level failures (`Ahp`, `InconsistentMatrix`), an unknown job
    /// profile, or a failure to list candidates abort the run before any
    /// candidate is scored. Per-candidate failures never abort the run; they
    /// are collected into the report.
    pub async fn run(
        &self,
        job_profile_id: JobProfileId,
        kind: ScoringRunKind,
        mut cancel: watch::Receiver<bool>,
    ) -> Result<BatchScoringReport, ScoringError> {
        let mut status = ScoringRunStatus::Pending;

        if *cancel.borrow() {
            status = advance(job_profile_id, status, ScoringRunStatus::Cancelled)?;
            return Ok(BatchScoringReport::summarize(
                job_profile_id,
                status,
                None,
                &[],
                Vec::new(),
                0,
            ));
        }

        status = advance(job_profile_id, status, ScoringRunStatus::Validating)?;
        let (model, candidates) = match self.prepare(job_profile_id, kind).await {
            Ok(prepared) => prepared,
            Err(e) => {
                advance(job_profile_id, status, ScoringRunStatus::Failed)?;
                warn!(
                    %job_profile_id,
                    code = %e.code(),
                    error = %e,
                    "Scoring run failed before dispatch"
                );
                return Err(e);
            }
        };

        if *cancel.borrow() {
            status = advance(job_profile_id, status, ScoringRunStatus::Cancelled)?;
            return Ok(BatchScoringReport::summarize(
                job_profile_id,
                status,
                Some(model.consistency),
                &[],
                Vec::new(),
                candidates.len(),
            ));
        }

        status = advance(job_profile_id, status, ScoringRunStatus::Scoring)?;

        let model = Arc::new(model);
        let semaphore = Arc::new(Semaphore::new(self.max_in_flight));
        let mut handles = Vec::with_capacity(candidates.len());
        let mut skipped = 0;
        let mut cancelled = false;

        for (index, candidate_id) in candidates.iter().copied().enumerate() {
            if *cancel.borrow() {
                cancelled = true;
                skipped = candidates.len() - index;
                break;
            }

            let acquired = tokio::select! {
                biased;
                _ = wait_cancelled(&mut cancel) => None,
                // The semaphore is never closed.
                permit = Arc::clone(&semaphore).acquire_owned() => permit.ok(),
            };
            let Some(permit) = acquired else {
                cancelled = true;
                skipped = candidates.len() - index;
                break;
            };

            let model = Arc::clone(&model);
            let sub_scores = Arc::clone(&self.sub_scores);
            let scores = Arc::clone(&self.scores);
            let handle = tokio::spawn(async move {
                let _permit = permit;
                model
                    .score_candidate(candidate_id, sub_scores.as_ref(), scores.as_ref())
                    .await
            });
            handles.push((candidate_id, handle));
        }

        let mut scored = Vec::with_capacity(handles.len());
        let mut failures = Vec::new();
        for (candidate_id, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(join_error) => Err(ScoringError::Infrastructure(DomainError::new(
                    ErrorCode::InternalError,
                    format!("Scoring task ended abnormally: {}", join_error),
                ))),
            };
            match outcome {
                Ok(record) => scored.push(record.overall_score),
                Err(e) => {
                    warn!(
                        %job_profile_id,
                        %candidate_id,
                        code = %e.code(),
                        error = %e,
                        "Candidate could not be scored"
                    );
                    failures.push(CandidateFailure::new(candidate_id, &e));
                }
            }
        }

        let final_status = if cancelled {
            ScoringRunStatus::Cancelled
        } else {
            ScoringRunStatus::Completed
        };
        status = advance(job_profile_id, status, final_status)?;

        let report = BatchScoringReport::summarize(
            job_profile_id,
            status,
            Some(model.consistency),
            &scored,
            failures,
            skipped,
        );

        info!(
            %job_profile_id,
            status = %report.status,
            candidates_scored = report.candidates_scored,
            failures = report.failures,
            skipped = report.skipped,
            average_score = report.average_score,
            "Scoring run finished"
        );

        Ok(report)
    }

    /// Validation phase: derive and check weights, then list candidates.
    async fn prepare(
        &self,
        job_profile_id: JobProfileId,
        kind: ScoringRunKind,
    ) -> Result<(ScoringModel, Vec<CandidateId>), ScoringError> {
        let model = self.loader.load(job_profile_id).await?;
        if kind == ScoringRunKind::Refresh {
            self.loader.save_weights(&model).await?;
            debug!(%job_profile_id, "Persisted refreshed criterion weights");
        }
        let candidates = self.candidates.list_candidates(&job_profile_id).await?;
        Ok((model, candidates))
    }
}

fn advance(
    job_profile_id: JobProfileId,
    from: ScoringRunStatus,
    to: ScoringRunStatus,
) -> Result<ScoringRunStatus, ScoringError> {
    let next = from.transition_to(to).map_err(|e| {
        ScoringError::Infrastructure(DomainError::new(
            ErrorCode::InvalidStateTransition,
            e.to_string(),
        ))
    })?;
    debug!(%job_profile_id, from = %from, to = %next, "Scoring run transition");
    Ok(next)
}

/// Resolves once the flag reads `true`; never resolves if the sender is gone.
async fn wait_cancelled(cancel: &mut watch::Receiver<bool>) {
    loop {
        if *cancel.borrow_and_update() {
            return;
        }
        if cancel.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
