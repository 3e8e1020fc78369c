//! CriteriaRepository port for criteria and pairwise judgments.

use async_trait::async_trait;

use crate::domain::ahp::{Criterion, Judgment};
use crate::domain::foundation::{CriterionId, DomainError, JobProfileId};

/// Repository for a job profile's AHP inputs.
#[async_trait]
pub trait CriteriaRepository: Send + Sync {
    /// Criteria of a job profile, in a stable order.
    ///
    /// Returns an empty list for an unknown job profile.
    async fn find_criteria(&self, job_profile_id: &JobProfileId)
        -> Result<Vec<Criterion>, DomainError>;

    /// Every stored judgment for a job profile, in one direction per pair.
    async fn find_judgments(&self, job_profile_id: &JobProfileId)
        -> Result<Vec<Judgment>, DomainError>;

    /// Persist derived weights for the given criteria.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save_weights(
        &self,
        job_profile_id: &JobProfileId,
        weights: &[(CriterionId, f64)],
    ) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn criteria_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn CriteriaRepository) {}
    }
}
