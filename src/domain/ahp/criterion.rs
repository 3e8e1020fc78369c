//! Criteria, pairwise judgments and the Saaty intensity scale.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CriterionId, JobProfileId};

/// Smallest value on the Saaty scale (B is extremely more important than A).
pub const SAATY_MIN: f64 = 1.0 / 9.0;

/// Largest value on the Saaty scale (A is extremely more important than B).
pub const SAATY_MAX: f64 = 9.0;

/// Slack below 1/9 for values such as `0.1111111` entered for it.
const SAATY_MIN_TOLERANCE: f64 = 1e-6;

/// Number of decimal places kept when a derived weight is stored.
pub const WEIGHT_DECIMALS: i32 = 6;

/// A comparison value on the Saaty scale, guaranteed to lie in [1/9, 9].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaatyValue(f64);

impl SaatyValue {
    /// Equal importance.
    pub const EQUAL: Self = Self(1.0);

    /// Validates a raw comparison value.
    ///
    /// Returns `None` for non-finite values and values outside the scale.
    /// A rounded 1/9 is accepted and stored as exactly 1/9.
    pub fn try_new(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        if value < SAATY_MIN - SAATY_MIN_TOLERANCE || value > SAATY_MAX {
            return None;
        }
        Some(Self(value.clamp(SAATY_MIN, SAATY_MAX)))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// The value of the reverse comparison.
    pub fn reciprocal(&self) -> f64 {
        (1.0 / self.0).clamp(SAATY_MIN, SAATY_MAX)
    }
}

/// An evaluation criterion of a job profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: CriterionId,
    pub job_profile_id: JobProfileId,
    pub name: String,
    /// Weight last derived from the profile's judgments, if any.
    pub weight: Option<f64>,
}

impl Criterion {
    pub fn new(job_profile_id: JobProfileId, name: impl Into<String>) -> Self {
        Self {
            id: CriterionId::new(),
            job_profile_id,
            name: name.into(),
            weight: None,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }
}

/// One stored pairwise comparison: "A is `value` times as important as B".
///
/// The reverse pair is never stored; the matrix builder derives it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Judgment {
    pub job_profile_id: JobProfileId,
    pub criterion_a: CriterionId,
    pub criterion_b: CriterionId,
    pub value: f64,
}

impl Judgment {
    pub fn new(
        job_profile_id: JobProfileId,
        criterion_a: CriterionId,
        criterion_b: CriterionId,
        value: f64,
    ) -> Self {
        Self {
            job_profile_id,
            criterion_a,
            criterion_b,
            value,
        }
    }
}

/// Rounds a derived weight to the stored precision.
pub fn round_weight(weight: f64) -> f64 {
    let factor = 10f64.powi(WEIGHT_DECIMALS);
    (weight * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saaty_accepts_scale_bounds() {
        assert!(SaatyValue::try_new(1.0 / 9.0).is_some());
        assert!(SaatyValue::try_new(9.0).is_some());
        assert!(SaatyValue::try_new(1.0).is_some());
    }

    #[test]
    fn saaty_snaps_rounded_one_ninth_to_the_bound() {
        let v = SaatyValue::try_new(0.111111).unwrap();
        assert_eq!(v.value(), SAATY_MIN);
        assert!(v.reciprocal() <= SAATY_MAX);
    }

    #[test]
    fn saaty_has_no_slack_above_nine() {
        assert!(SaatyValue::try_new(9.0000009).is_none());
        assert!(SaatyValue::try_new(9.0 + 1e-12).is_none());
    }

    #[test]
    fn saaty_rejects_out_of_scale_values() {
        assert!(SaatyValue::try_new(0.0).is_none());
        assert!(SaatyValue::try_new(-3.0).is_none());
        assert!(SaatyValue::try_new(0.1).is_none());
        assert!(SaatyValue::try_new(9.5).is_none());
        assert!(SaatyValue::try_new(f64::NAN).is_none());
        assert!(SaatyValue::try_new(f64::INFINITY).is_none());
    }

    #[test]
    fn saaty_reciprocal() {
        let v = SaatyValue::try_new(4.0).unwrap();
        assert_eq!(v.reciprocal(), 0.25);
    }

    #[test]
    fn round_weight_keeps_six_decimals() {
        assert_eq!(round_weight(0.123_456_789), 0.123457);
        assert_eq!(round_weight(1.0 / 3.0), 0.333333);
    }
}
