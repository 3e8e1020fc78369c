//! Shared fixtures for scoring handler tests.

use crate::adapters::memory::{InMemoryScoringStore, StaticSubScoreProvider};
use crate::domain::ahp::{Criterion, Judgment};
use crate::domain::foundation::{CandidateId, JobProfileId};
use crate::domain::scoring::SubScores;

pub(crate) struct ProfileFixture {
    pub job_profile_id: JobProfileId,
    pub criteria: Vec<Criterion>,
    /// Sorted the way the store lists them.
    pub candidates: Vec<CandidateId>,
    pub store: InMemoryScoringStore,
    pub provider: StaticSubScoreProvider,
}

async fn profile_with_judgments(values: [f64; 3], candidate_count: usize) -> ProfileFixture {
    let job_profile_id = JobProfileId::new();
    let store = InMemoryScoringStore::new();
    let provider = StaticSubScoreProvider::new();

    let criteria: Vec<Criterion> = ["skills", "experience", "education"]
        .iter()
        .map(|name| Criterion::new(job_profile_id, *name))
        .collect();
    for criterion in &criteria {
        store.add_criterion(criterion.clone()).await;
    }

    let pairs = [(0, 1), (0, 2), (1, 2)];
    for ((a, b), value) in pairs.iter().zip(values) {
        store
            .add_judgment(Judgment::new(
                job_profile_id,
                criteria[*a].id,
                criteria[*b].id,
                value,
            ))
            .await;
    }

    let mut candidates: Vec<CandidateId> =
        (0..candidate_count).map(|_| CandidateId::new()).collect();
    candidates.sort();
    for (i, candidate) in candidates.iter().enumerate() {
        store.add_candidate(job_profile_id, *candidate).await;
        let level = (i + 1) as f64 / (candidate_count + 1) as f64;
        let sub_scores: SubScores = criteria.iter().map(|c| (c.id, level)).collect();
        provider.set(job_profile_id, *candidate, sub_scores).await;
    }

    ProfileFixture {
        job_profile_id,
        criteria,
        candidates,
        store,
        provider,
    }
}

/// Three criteria (skills > experience > education, CR ≈ 0.003) and three
/// candidates with complete sub-scores.
pub(crate) async fn seeded_profile() -> ProfileFixture {
    profile_with_judgments([3.0, 5.0, 2.0], 3).await
}

/// Same shape as `seeded_profile` but with n candidates.
pub(crate) async fn seeded_profile_with(candidate_count: usize) -> ProfileFixture {
    profile_with_judgments([3.0, 5.0, 2.0], candidate_count).await
}

/// Skills >> experience >> education, yet education >> skills.
pub(crate) async fn contradictory_profile() -> ProfileFixture {
    profile_with_judgments([9.0, 1.0 / 9.0, 9.0], 3).await
}
