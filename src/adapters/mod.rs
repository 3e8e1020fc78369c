//! Adapters - Implementations of port interfaces.
//!
//! - `http` - Axum REST API
//! - `memory` - In-process stores for tests and local runs
//! - `postgres` - sqlx-backed persistence
//! - `sub_scores` - HTTP client for the sub-score service

pub mod http;
pub mod memory;
pub mod postgres;
pub mod sub_scores;

pub use memory::{InMemoryScoringStore, StaticSubScoreProvider};
pub use postgres::{
    PostgresCandidateReader, PostgresCriteriaRepository, PostgresScoreRepository, MIGRATOR,
};
pub use sub_scores::{HttpSubScoreConfig, HttpSubScoreProvider};
