//! PostgreSQL implementation of ScoreRepository.
//!
//! One row per (job profile, candidate). Upserts go through
//! `ON CONFLICT ... DO UPDATE`, which keeps the original row id.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, types::Json, PgPool, Row};
use uuid::Uuid;

use crate::domain::foundation::{CandidateId, DomainError, JobProfileId, ScoreRecordId, Timestamp};
use crate::domain::scoring::{ScoreBreakdown, ScoreRecord};
use crate::ports::ScoreRepository;

const RECORD_COLUMNS: &str = "id, job_profile_id, candidate_id, overall_score, match_percentage, \
     breakdown, consistency_ratio, methodology, scored_at";

/// PostgreSQL implementation of ScoreRepository.
#[derive(Clone)]
pub struct PostgresScoreRepository {
    pool: PgPool,
}

impl PostgresScoreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScoreRepository for PostgresScoreRepository {
    async fn upsert(&self, record: &ScoreRecord) -> Result<ScoreRecord, DomainError> {
        let sql = format!(
            r#"
            INSERT INTO candidate_scores ({RECORD_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (job_profile_id, candidate_id) DO UPDATE SET
                overall_score = EXCLUDED.overall_score,
                match_percentage = EXCLUDED.match_percentage,
                breakdown = EXCLUDED.breakdown,
                consistency_ratio = EXCLUDED.consistency_ratio,
                methodology = EXCLUDED.methodology,
                scored_at = EXCLUDED.scored_at
            RETURNING {RECORD_COLUMNS}
            "#
        );

        let row = sqlx::query(&sql)
            .bind(record.id.as_uuid())
            .bind(record.job_profile_id.as_uuid())
            .bind(record.candidate_id.as_uuid())
            .bind(record.overall_score)
            .bind(i16::from(record.match_percentage))
            .bind(Json(&record.breakdown))
            .bind(record.consistency_ratio)
            .bind(&record.methodology)
            .bind(record.scored_at.as_datetime())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to upsert score: {}", e)))?;

        row_to_record(&row)
    }

    async fn find(
        &self,
        job_profile_id: &JobProfileId,
        candidate_id: &CandidateId,
    ) -> Result<Option<ScoreRecord>, DomainError> {
        let sql = format!(
            "SELECT {RECORD_COLUMNS} FROM candidate_scores \
             WHERE job_profile_id = $1 AND candidate_id = $2"
        );

        let row = sqlx::query(&sql)
            .bind(job_profile_id.as_uuid())
            .bind(candidate_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to fetch score: {}", e)))?;

        row.as_ref().map(row_to_record).transpose()
    }

    async fn top_by_job_profile(
        &self,
        job_profile_id: &JobProfileId,
        limit: usize,
    ) -> Result<Vec<ScoreRecord>, DomainError> {
        let sql = format!(
            "SELECT {RECORD_COLUMNS} FROM candidate_scores \
             WHERE job_profile_id = $1 \
             ORDER BY overall_score DESC, scored_at ASC, candidate_id ASC \
             LIMIT $2"
        );

        let rows = sqlx::query(&sql)
            .bind(job_profile_id.as_uuid())
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to fetch top scores: {}", e)))?;

        rows.iter().map(row_to_record).collect()
    }
}

fn row_to_record(row: &PgRow) -> Result<ScoreRecord, DomainError> {
    let map_err =
        |e: sqlx::Error| DomainError::database(format!("Failed to read score row: {}", e));

    let id: Uuid = row.try_get("id").map_err(map_err)?;
    let job_profile_id: Uuid = row.try_get("job_profile_id").map_err(map_err)?;
    let candidate_id: Uuid = row.try_get("candidate_id").map_err(map_err)?;
    let match_percentage: i16 = row.try_get("match_percentage").map_err(map_err)?;
    let breakdown: Json<ScoreBreakdown> = row.try_get("breakdown").map_err(map_err)?;
    let scored_at: DateTime<Utc> = row.try_get("scored_at").map_err(map_err)?;

    Ok(ScoreRecord {
        id: ScoreRecordId::from_uuid(id),
        job_profile_id: JobProfileId::from_uuid(job_profile_id),
        candidate_id: CandidateId::from_uuid(candidate_id),
        overall_score: row.try_get("overall_score").map_err(map_err)?,
        match_percentage: match_percentage.clamp(0, 100) as u8,
        breakdown: breakdown.0,
        consistency_ratio: row.try_get("consistency_ratio").map_err(map_err)?,
        methodology: row.try_get("methodology").map_err(map_err)?,
        scored_at: Timestamp::from_datetime(scored_at),
    })
}
