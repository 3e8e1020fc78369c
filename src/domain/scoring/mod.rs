//! Scoring Module - Turning AHP weights into candidate scores.
//!
//! - `CandidateScorer` - Weighted sum of one candidate's sub-scores
//! - `ScoreRecord` - What gets persisted per (job profile, candidate)
//! - `ScoringRunStatus` - Lifecycle of a batch run
//! - `BatchScoringReport` - Summary of a batch run

mod candidate_scorer;
mod errors;
mod report;
mod run_status;
mod score_record;

pub use candidate_scorer::{
    CandidateScorer, CriterionContribution, ScoreBreakdown, ScoreCard, SubScores,
    WeightedCriterion,
};
pub use errors::{Resource, ScoringError, SubScoreDefect};
pub use report::{BatchScoringReport, CandidateFailure};
pub use run_status::ScoringRunStatus;
pub use score_record::{ScoreRecord, TopCandidatesLimit, AHP_METHODOLOGY, MAX_TOP_CANDIDATES};
