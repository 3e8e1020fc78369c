//! PostgreSQL implementation of CandidateReader.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{CandidateId, DomainError, JobProfileId};
use crate::ports::CandidateReader;

/// PostgreSQL implementation of CandidateReader.
#[derive(Clone)]
pub struct PostgresCandidateReader {
    pool: PgPool,
}

impl PostgresCandidateReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CandidateReader for PostgresCandidateReader {
    async fn list_candidates(
        &self,
        job_profile_id: &JobProfileId,
    ) -> Result<Vec<CandidateId>, DomainError> {
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT candidate_id
            FROM job_profile_candidates
            WHERE job_profile_id = $1
            ORDER BY candidate_id
            "#,
        )
        .bind(job_profile_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list candidates: {}", e)))?;

        Ok(rows
            .into_iter()
            .map(|(id,)| CandidateId::from_uuid(id))
            .collect())
    }
}
