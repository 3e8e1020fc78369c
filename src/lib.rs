//! Vetterati Scoring - AHP-based candidate ranking
//!
//! Derives criterion weights from pairwise judgments, checks their
//! consistency, and scores candidates of a job profile against them.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
