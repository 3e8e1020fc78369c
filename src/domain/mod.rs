//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `ahp` - Pairwise comparison matrices, weight derivation, consistency checking
//! - `scoring` - Candidate scoring, score records and batch run reports

pub mod ahp;
pub mod foundation;
pub mod scoring;
