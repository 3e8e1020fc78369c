//! PostgreSQL implementation of CriteriaRepository.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use crate::domain::ahp::{Criterion, Judgment};
use crate::domain::foundation::{CriterionId, DomainError, JobProfileId};
use crate::ports::CriteriaRepository;

/// PostgreSQL implementation of CriteriaRepository.
#[derive(Clone)]
pub struct PostgresCriteriaRepository {
    pool: PgPool,
}

impl PostgresCriteriaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CriteriaRepository for PostgresCriteriaRepository {
    async fn find_criteria(
        &self,
        job_profile_id: &JobProfileId,
    ) -> Result<Vec<Criterion>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, job_profile_id, name, weight
            FROM criteria
            WHERE job_profile_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(job_profile_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch criteria: {}", e)))?;

        rows.iter().map(row_to_criterion).collect()
    }

    async fn find_judgments(
        &self,
        job_profile_id: &JobProfileId,
    ) -> Result<Vec<Judgment>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT job_profile_id, criterion_a_id, criterion_b_id, value
            FROM pairwise_comparisons
            WHERE job_profile_id = $1
            "#,
        )
        .bind(job_profile_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch judgments: {}", e)))?;

        rows.iter().map(row_to_judgment).collect()
    }

    async fn save_weights(
        &self,
        job_profile_id: &JobProfileId,
        weights: &[(CriterionId, f64)],
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database(format!("Failed to begin transaction: {}", e)))?;

        for (criterion_id, weight) in weights {
            sqlx::query("UPDATE criteria SET weight = $3 WHERE job_profile_id = $1 AND id = $2")
                .bind(job_profile_id.as_uuid())
                .bind(criterion_id.as_uuid())
                .bind(weight)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    DomainError::database(format!("Failed to save criterion weight: {}", e))
                })?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database(format!("Failed to commit weights: {}", e)))?;

        Ok(())
    }
}

fn row_to_criterion(row: &PgRow) -> Result<Criterion, DomainError> {
    Ok(Criterion {
        id: CriterionId::from_uuid(get(row, "id")?),
        job_profile_id: JobProfileId::from_uuid(get(row, "job_profile_id")?),
        name: get(row, "name")?,
        weight: get(row, "weight")?,
    })
}

fn row_to_judgment(row: &PgRow) -> Result<Judgment, DomainError> {
    Ok(Judgment::new(
        JobProfileId::from_uuid(get(row, "job_profile_id")?),
        CriterionId::from_uuid(get::<Uuid>(row, "criterion_a_id")?),
        CriterionId::from_uuid(get::<Uuid>(row, "criterion_b_id")?),
        get(row, "value")?,
    ))
}

fn get<'r, T>(row: &'r PgRow, column: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(column)
        .map_err(|e| DomainError::database(format!("Failed to read column {}: {}", column, e)))
}
