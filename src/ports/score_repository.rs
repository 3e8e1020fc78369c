//! ScoreRepository port for candidate score persistence.

use async_trait::async_trait;

use crate::domain::foundation::{CandidateId, DomainError, JobProfileId};
use crate::domain::scoring::ScoreRecord;

/// Repository for score records, keyed by (job profile, candidate).
#[async_trait]
pub trait ScoreRepository: Send + Sync {
    /// Insert a record or replace the content of the existing one.
    ///
    /// Returns the stored record. When a record already existed its `id`
    /// is kept, so repeated upserts leave exactly one record.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn upsert(&self, record: &ScoreRecord) -> Result<ScoreRecord, DomainError>;

    /// Find the record for one candidate.
    async fn find(
        &self,
        job_profile_id: &JobProfileId,
        candidate_id: &CandidateId,
    ) -> Result<Option<ScoreRecord>, DomainError>;

    /// Highest-scoring records for a job profile.
    ///
    /// Ordered by overall score descending, then earliest `scored_at`,
    /// then candidate id.
    async fn top_by_job_profile(
        &self,
        job_profile_id: &JobProfileId,
        limit: usize,
    ) -> Result<Vec<ScoreRecord>, DomainError>;
}
