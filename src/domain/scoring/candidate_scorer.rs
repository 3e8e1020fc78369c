//! Candidate Scorer - Weighted aggregation of per-criterion sub-scores.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::{ScoringError, SubScoreDefect};
use crate::domain::ahp::{Criterion, PriorityVector};
use crate::domain::foundation::CriterionId;

/// Raw per-criterion sub-scores for one candidate, each expected in [0, 1].
pub type SubScores = HashMap<CriterionId, f64>;

/// A criterion paired with its derived weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedCriterion {
    pub id: CriterionId,
    pub name: String,
    pub weight: f64,
}

impl WeightedCriterion {
    pub fn new(id: CriterionId, name: impl Into<String>, weight: f64) -> Self {
        Self {
            id,
            name: name.into(),
            weight,
        }
    }

    /// Pairs criteria with the weights derived for them.
    ///
    /// Criteria absent from the priority vector are skipped.
    pub fn from_priorities(criteria: &[Criterion], priorities: &PriorityVector) -> Vec<Self> {
        criteria
            .iter()
            .filter_map(|c| {
                priorities
                    .weight_of(&c.id)
                    .map(|weight| Self::new(c.id, c.name.clone(), weight))
            })
            .collect()
    }
}

/// One line of a score breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriterionContribution {
    pub criterion_id: CriterionId,
    pub weight: f64,
    pub sub_score: f64,
    /// `weight * sub_score`.
    pub contribution: f64,
}

/// Per-criterion explanation of an overall score, keyed by criterion name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreBreakdown(BTreeMap<String, CriterionContribution>);

impl ScoreBreakdown {
    pub fn get(&self, criterion_name: &str) -> Option<&CriterionContribution> {
        self.0.get(criterion_name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CriterionContribution)> {
        self.0.iter()
    }

    fn insert(&mut self, name: String, line: CriterionContribution) {
        self.0.insert(name, line);
    }
}

/// Result of scoring one candidate, before it becomes a stored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreCard {
    /// Weighted sum of sub-scores, in [0, 1].
    pub overall_score: f64,
    pub breakdown: ScoreBreakdown,
}

impl ScoreCard {
    /// Overall score as a truncated whole percentage.
    pub fn match_percentage(&self) -> u8 {
        (self.overall_score * 100.0).floor().clamp(0.0, 100.0) as u8
    }
}

/// Stateless candidate scoring.
pub struct CandidateScorer;

impl CandidateScorer {
    /// Combines criterion weights with one candidate's sub-scores.
    ///
    /// # Algorithm
    /// For each criterion k: `contribution[k] = weight[k] * sub_score[k]`;
    /// overall = Σ contribution.
    ///
    /// # Errors
    /// - `MissingSubScore` (`Absent`) if a weighted criterion has no sub-score
    /// - `MissingSubScore` (`OutOfRange`) if a sub-score is outside [0, 1] or NaN
    ///
    /// Sub-scores for criteria that carry no weight are ignored.
    pub fn score(
        criteria: &[WeightedCriterion],
        sub_scores: &SubScores,
    ) -> Result<ScoreCard, ScoringError> {
        let mut breakdown = ScoreBreakdown::default();
        let mut overall = 0.0;

        for criterion in criteria {
            let sub_score = *sub_scores.get(&criterion.id).ok_or_else(|| {
                ScoringError::MissingSubScore {
                    criterion_id: criterion.id,
                    criterion_name: criterion.name.clone(),
                    defect: SubScoreDefect::Absent,
                }
            })?;

            if !(0.0..=1.0).contains(&sub_score) {
                return Err(ScoringError::MissingSubScore {
                    criterion_id: criterion.id,
                    criterion_name: criterion.name.clone(),
                    defect: SubScoreDefect::OutOfRange { value: sub_score },
                });
            }

            let contribution = criterion.weight * sub_score;
            overall += contribution;
            breakdown.insert(
                criterion.name.clone(),
                CriterionContribution {
                    criterion_id: criterion.id,
                    weight: criterion.weight,
                    sub_score,
                    contribution,
                },
            );
        }

        Ok(ScoreCard {
            // Weights sum to 1 only within rounding error.
            overall_score: overall.clamp(0.0, 1.0),
            breakdown,
        })
    }
}
