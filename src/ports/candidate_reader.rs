//! CandidateReader port for job profile membership.

use async_trait::async_trait;

use crate::domain::foundation::{CandidateId, DomainError, JobProfileId};

/// Reader port listing the candidates associated with a job profile.
#[async_trait]
pub trait CandidateReader: Send + Sync {
    /// Candidates of a job profile, ordered by candidate id.
    async fn list_candidates(&self, job_profile_id: &JobProfileId)
        -> Result<Vec<CandidateId>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn CandidateReader) {}
    }
}
