//! Core domain types for Ironlog.
//!
//! These are passive data shapes decoded from the fixture files and
//! persisted as documents:
//! - Users
//! - Weigh-ins and weights
//! - Workouts, exercises and sets

use chrono::{DateTime, NaiveDate, Utc};
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Users
// ============================================================================

/// A tracked person. Gets an identifier only once persisted.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub name: String,
}

// ============================================================================
// Weights
// ============================================================================

/// Unit attached to a weight quantity.
///
/// Unrecognized units are kept verbatim rather than rejected.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum UnitOfMeasure {
    Pounds,
    Kilograms,
    Other(String),
}

impl UnitOfMeasure {
    pub fn as_str(&self) -> &str {
        match self {
            UnitOfMeasure::Pounds => "pounds",
            UnitOfMeasure::Kilograms => "kilograms",
            UnitOfMeasure::Other(s) => s,
        }
    }
}

impl From<String> for UnitOfMeasure {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pounds" => UnitOfMeasure::Pounds,
            "kilograms" => UnitOfMeasure::Kilograms,
            _ => UnitOfMeasure::Other(s),
        }
    }
}

impl From<UnitOfMeasure> for String {
    fn from(unit: UnitOfMeasure) -> Self {
        match unit {
            UnitOfMeasure::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for UnitOfMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A quantity with its unit of measure
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Weight {
    pub quantity: f64,
    /// Stored under the `string` key to stay compatible with existing fixtures.
    #[serde(rename = "string")]
    pub unit: UnitOfMeasure,
}

impl Weight {
    pub fn new(quantity: f64, unit: UnitOfMeasure) -> Self {
        Self { quantity, unit }
    }
}

/// A single body-weight entry
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WeighIn {
    /// Owner, referenced by name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Decoded from RFC 3339, stored as a BSON date-time
    #[serde(serialize_with = "chrono_datetime_as_bson_datetime::serialize")]
    pub timestamp: DateTime<Utc>,
    /// None means no measurement was recorded for this entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Weight>,
}

// ============================================================================
// Workouts
// ============================================================================

/// One set of an exercise
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Set {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Weight>,
    pub reps: u32,
}

/// A named exercise and its sets, in performed order
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub name: String,
    pub sets: Vec<Set>,
}

/// A training day
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Workout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    pub date: NaiveDate,
    pub exercises: Vec<Exercise>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weigh_in_without_user() {
        let json = r#"{"timestamp":"2024-01-01T00:00:00Z","weight":{"quantity":70.5,"string":"kilograms"}}"#;
        let weigh_in: WeighIn = serde_json::from_str(json).unwrap();

        assert!(weigh_in.user.is_none());
        let weight = weigh_in.weight.unwrap();
        assert_eq!(weight.quantity, 70.5);
        assert_eq!(weight.unit, UnitOfMeasure::Kilograms);
    }

    #[test]
    fn test_absent_fields_stay_absent() {
        let json = r#"{"timestamp":"2024-03-02T07:15:00Z"}"#;
        let weigh_in: WeighIn = serde_json::from_str(json).unwrap();
        assert!(weigh_in.weight.is_none());

        let out = serde_json::to_value(&weigh_in).unwrap();
        let obj = out.as_object().unwrap();
        assert!(!obj.contains_key("user"));
        assert!(!obj.contains_key("weight"));
    }

    #[test]
    fn test_present_empty_user_is_not_absent() {
        let json = r#"{"user":"","timestamp":"2024-03-02T07:15:00Z"}"#;
        let weigh_in: WeighIn = serde_json::from_str(json).unwrap();
        assert_eq!(weigh_in.user.as_deref(), Some(""));
    }

    #[test]
    fn test_unit_wire_key_is_string() {
        let weight = Weight::new(135.0, UnitOfMeasure::Pounds);
        let out = serde_json::to_value(&weight).unwrap();
        assert_eq!(out["string"], "pounds");
        assert!(out.get("unit").is_none());
    }

    #[test]
    fn test_unknown_unit_kept_verbatim() {
        let json = r#"{"quantity":12,"string":"stone"}"#;
        let weight: Weight = serde_json::from_str(json).unwrap();
        assert_eq!(weight.unit, UnitOfMeasure::Other("stone".into()));

        let out = serde_json::to_value(&weight).unwrap();
        assert_eq!(out["string"], "stone");
    }

    #[test]
    fn test_timestamp_stored_as_bson_datetime() {
        let json = r#"{"user":"Alice","timestamp":"2024-01-01T00:00:00Z"}"#;
        let weigh_in: WeighIn = serde_json::from_str(json).unwrap();

        let doc = mongodb::bson::to_document(&weigh_in).unwrap();
        let stored = doc.get_datetime("timestamp").unwrap();
        assert_eq!(stored.to_chrono(), weigh_in.timestamp);
    }

    #[test]
    fn test_workout_date_stays_calendar_string() {
        let json = r#"{"date": "2024-05-06", "exercises": []}"#;
        let workout: Workout = serde_json::from_str(json).unwrap();

        let doc = mongodb::bson::to_document(&workout).unwrap();
        assert_eq!(doc.get_str("date").unwrap(), "2024-05-06");
        assert!(!doc.contains_key("user"));
    }

    #[test]
    fn test_workout_decodes_date_and_sets() {
        let json = r#"{
            "user": "Alice",
            "date": "2024-05-06",
            "exercises": [
                {"name": "squat", "sets": [
                    {"weight": {"quantity": 60, "string": "kilograms"}, "reps": 5},
                    {"reps": 12}
                ]},
                {"name": "pullup", "sets": [{"reps": 8}]}
            ]
        }"#;
        let workout: Workout = serde_json::from_str(json).unwrap();

        assert_eq!(workout.date, NaiveDate::from_ymd_opt(2024, 5, 6).unwrap());
        assert_eq!(workout.exercises[0].name, "squat");
        assert_eq!(workout.exercises[1].name, "pullup");
        assert_eq!(workout.exercises[0].sets.len(), 2);
        assert!(workout.exercises[0].sets[1].weight.is_none());
    }

    #[test]
    fn test_negative_reps_rejected() {
        let json = r#"{"reps": -3}"#;
        assert!(serde_json::from_str::<Set>(json).is_err());

        let json = r#"{"reps": "ten"}"#;
        assert!(serde_json::from_str::<Set>(json).is_err());
    }
}
