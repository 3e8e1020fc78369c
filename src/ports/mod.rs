//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the scoring core and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `CriteriaRepository` - Criteria, judgments and derived weights
//! - `CandidateReader` - Candidates associated with a job profile
//! - `ScoreRepository` - Score records keyed by (job profile, candidate)
//!
//! ## Collaborator Ports
//!
//! - `SubScoreProvider` - Per-criterion sub-scores from the matching service

mod candidate_reader;
mod criteria_repository;
mod score_repository;
mod sub_score_provider;

pub use candidate_reader::CandidateReader;
pub use criteria_repository::CriteriaRepository;
pub use score_repository::ScoreRepository;
pub use sub_score_provider::SubScoreProvider;
