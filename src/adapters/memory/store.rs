//! In-Memory Scoring Store
//!
//! Implements every persistence port over `HashMap`s. Upserts keep the
//! original record id, matching the PostgreSQL adapter.

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::ahp::{Criterion, Judgment};
use crate::domain::foundation::{CandidateId, CriterionId, DomainError, JobProfileId};
use crate::domain::scoring::ScoreRecord;
use crate::ports::{CandidateReader, CriteriaRepository, ScoreRepository};

#[derive(Debug, Default)]
struct ProfileData {
    criteria: Vec<Criterion>,
    judgments: Vec<Judgment>,
    candidates: BTreeSet<CandidateId>,
}

/// In-memory storage for job profiles and their score records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryScoringStore {
    profiles: Arc<RwLock<HashMap<JobProfileId, ProfileData>>>,
    scores: Arc<RwLock<HashMap<(JobProfileId, CandidateId), ScoreRecord>>>,
}

impl InMemoryScoringStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_criterion(&self, criterion: Criterion) {
        let mut profiles = self.profiles.write().await;
        profiles
            .entry(criterion.job_profile_id)
            .or_default()
            .criteria
            .push(criterion);
    }

    pub async fn add_judgment(&self, judgment: Judgment) {
        let mut profiles = self.profiles.write().await;
        profiles
            .entry(judgment.job_profile_id)
            .or_default()
            .judgments
            .push(judgment);
    }

    pub async fn add_candidate(&self, job_profile_id: JobProfileId, candidate_id: CandidateId) {
        let mut profiles = self.profiles.write().await;
        profiles
            .entry(job_profile_id)
            .or_default()
            .candidates
            .insert(candidate_id);
    }

    /// Replace the judgments of a job profile.
    pub async fn replace_judgments(&self, job_profile_id: JobProfileId, judgments: Vec<Judgment>) {
        let mut profiles = self.profiles.write().await;
        profiles.entry(job_profile_id).or_default().judgments = judgments;
    }

    /// Number of stored score records across all job profiles.
    pub async fn score_count(&self) -> usize {
        self.scores.read().await.len()
    }
}

#[async_trait]
impl CriteriaRepository for InMemoryScoringStore {
    async fn find_criteria(
        &self,
        job_profile_id: &JobProfileId,
    ) -> Result<Vec<Criterion>, DomainError> {
        let profiles = self.profiles.read().await;
        Ok(profiles
            .get(job_profile_id)
            .map(|p| p.criteria.clone())
            .unwrap_or_default())
    }

    async fn find_judgments(
        &self,
        job_profile_id: &JobProfileId,
    ) -> Result<Vec<Judgment>, DomainError> {
        let profiles = self.profiles.read().await;
        Ok(profiles
            .get(job_profile_id)
            .map(|p| p.judgments.clone())
            .unwrap_or_default())
    }

    async fn save_weights(
        &self,
        job_profile_id: &JobProfileId,
        weights: &[(CriterionId, f64)],
    ) -> Result<(), DomainError> {
        let mut profiles = self.profiles.write().await;
        if let Some(profile) = profiles.get_mut(job_profile_id) {
            for criterion in profile.criteria.iter_mut() {
                if let Some((_, w)) = weights.iter().find(|(id, _)| *id == criterion.id) {
                    criterion.weight = Some(*w);
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl CandidateReader for InMemoryScoringStore {
    async fn list_candidates(
        &self,
        job_profile_id: &JobProfileId,
    ) -> Result<Vec<CandidateId>, DomainError> {
        let profiles = self.profiles.read().await;
        Ok(profiles
            .get(job_profile_id)
            .map(|p| p.candidates.iter().copied().collect())
            .unwrap_or_default())
    }
}

#[async_trait]
impl ScoreRepository for InMemoryScoringStore {
    async fn upsert(&self, record: &ScoreRecord) -> Result<ScoreRecord, DomainError> {
        let mut scores = self.scores.write().await;
        let key = (record.job_profile_id, record.candidate_id);
        let mut stored = record.clone();
        if let Some(existing) = scores.get(&key) {
            stored.id = existing.id;
        }
        scores.insert(key, stored.clone());
        Ok(stored)
    }

    async fn find(
        &self,
        job_profile_id: &JobProfileId,
        candidate_id: &CandidateId,
    ) -> Result<Option<ScoreRecord>, DomainError> {
        let scores = self.scores.read().await;
        Ok(scores.get(&(*job_profile_id, *candidate_id)).cloned())
    }

    async fn top_by_job_profile(
        &self,
        job_profile_id: &JobProfileId,
        limit: usize,
    ) -> Result<Vec<ScoreRecord>, DomainError> {
        let scores = self.scores.read().await;
        let mut records: Vec<ScoreRecord> = scores
            .values()
            .filter(|r| r.job_profile_id == *job_profile_id)
            .cloned()
            .collect();
        records.sort_by(ScoreRecord::rank_order);
        records.truncate(limit);
        Ok(records)
    }
}
