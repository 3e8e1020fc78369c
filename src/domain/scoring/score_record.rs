//! Persisted score records and top-candidate ranking.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::{ScoreBreakdown, ScoreCard, ScoringError};
use crate::domain::foundation::{CandidateId, JobProfileId, ScoreRecordId, Timestamp};

/// Methodology tag stored with every record.
pub const AHP_METHODOLOGY: &str = "AHP";

/// Largest page size accepted by top-candidate queries.
pub const MAX_TOP_CANDIDATES: usize = 100;

/// The stored result of scoring one candidate against one job profile.
///
/// At most one record exists per (job profile, candidate); rescoring
/// replaces the content but keeps `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub id: ScoreRecordId,
    pub job_profile_id: JobProfileId,
    pub candidate_id: CandidateId,
    pub overall_score: f64,
    /// `overall_score` as a truncated whole percentage.
    pub match_percentage: u8,
    pub breakdown: ScoreBreakdown,
    /// CR of the judgments the weights came from.
    pub consistency_ratio: f64,
    pub methodology: String,
    pub scored_at: Timestamp,
}

impl ScoreRecord {
    pub fn from_card(
        job_profile_id: JobProfileId,
        candidate_id: CandidateId,
        card: ScoreCard,
        consistency_ratio: f64,
    ) -> Self {
        Self {
            id: ScoreRecordId::new(),
            job_profile_id,
            candidate_id,
            overall_score: card.overall_score,
            match_percentage: card.match_percentage(),
            breakdown: card.breakdown,
            consistency_ratio,
            methodology: AHP_METHODOLOGY.to_string(),
            scored_at: Timestamp::now(),
        }
    }

    /// Ordering for top-candidate queries: highest score first, earlier
    /// `scored_at` on ties, then candidate id.
    pub fn rank_order(a: &ScoreRecord, b: &ScoreRecord) -> Ordering {
        b.overall_score
            .total_cmp(&a.overall_score)
            .then_with(|| a.scored_at.cmp(&b.scored_at))
            .then_with(|| a.candidate_id.cmp(&b.candidate_id))
    }
}

/// Validated page size for top-candidate queries, in `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopCandidatesLimit(usize);

impl TopCandidatesLimit {
    pub fn try_new(limit: i64) -> Result<Self, ScoringError> {
        if limit < 1 || limit > MAX_TOP_CANDIDATES as i64 {
            return Err(ScoringError::InvalidLimit {
                limit,
                max: MAX_TOP_CANDIDATES,
            });
        }
        Ok(Self(limit as usize))
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for TopCandidatesLimit {
    fn default() -> Self {
        Self(10)
    }
}
