//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresCriteriaRepository` - Criteria, judgments and derived weights
//! - `PostgresCandidateReader` - Job profile membership
//! - `PostgresScoreRepository` - Score records with upsert-by-key
//!
//! Schema lives in `migrations/` and is applied with `MIGRATOR`.

mod candidate_reader;
mod criteria_repository;
mod score_repository;

pub use candidate_reader::PostgresCandidateReader;
pub use criteria_repository::PostgresCriteriaRepository;
pub use score_repository::PostgresScoreRepository;

/// Embedded schema migrations.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
