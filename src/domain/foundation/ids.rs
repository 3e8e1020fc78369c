//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Generates a UUID-backed identifier newtype with the usual constructors,
/// `Display` and `FromStr`.
macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

uuid_id!(
    /// Unique identifier for a job profile (the position being hired for).
    JobProfileId
);

uuid_id!(
    /// Unique identifier for a candidate.
    CandidateId
);

uuid_id!(
    /// Unique identifier for an evaluation criterion of a job profile.
    CriterionId
);

uuid_id!(
    /// Unique identifier for a stored score record.
    ScoreRecordId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_profile_id_generates_unique_values() {
        assert_ne!(JobProfileId::new(), JobProfileId::new());
    }

    #[test]
    fn candidate_id_parses_from_valid_string() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: CandidateId = uuid_str.parse().unwrap();
        assert_eq!(id.to_string(), uuid_str);
    }

    #[test]
    fn criterion_id_rejects_invalid_string() {
        assert!("not-a-uuid".parse::<CriterionId>().is_err());
    }

    #[test]
    fn score_record_id_from_uuid_preserves_value() {
        let uuid = Uuid::new_v4();
        assert_eq!(ScoreRecordId::from_uuid(uuid).as_uuid(), &uuid);
    }

    #[test]
    fn ids_serialize_as_plain_uuid_strings() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: JobProfileId = uuid_str.parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid_str));

        let back: JobProfileId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
