//! Sub-score adapters - Clients for the external matching service.

mod http_provider;

pub use http_provider::{HttpSubScoreConfig, HttpSubScoreProvider};
