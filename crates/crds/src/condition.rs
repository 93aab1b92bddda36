//! Status conditions
//!
//! Kubernetes-style conditions carried on `Package` and `PackageInfo` status.
//! Follows the `metav1.Condition` shape (type, status, reason, message).

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Condition types this client interprets.
///
/// The wire field is a free-form string; types written by the reconciler
/// (e.g. `Progressing`) round-trip unchanged. `Condition::condition_type`
/// maps it onto this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionType {
    /// Resource reached its desired state
    Ready,

    /// Resource cannot reach its desired state without intervention
    Failed,

    /// Any condition type this client does not interpret
    Other,
}

impl ConditionType {
    /// Wire name; `Other` has none of its own.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionType::Ready => "Ready",
            ConditionType::Failed => "Failed",
            ConditionType::Other => "Other",
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "Ready" => ConditionType::Ready,
            "Failed" => ConditionType::Failed,
            _ => ConditionType::Other,
        }
    }
}

impl From<ConditionType> for String {
    fn from(type_: ConditionType) -> Self {
        type_.as_str().to_string()
    }
}

/// Condition status (tri-state)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
pub enum ConditionStatus {
    True,
    False,
    #[default]
    Unknown,
}

/// A single status condition.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Condition type, as written by the reconciler
    #[serde(rename = "type")]
    pub type_: String,

    /// Condition status
    pub status: ConditionStatus,

    /// Machine-readable reason (CamelCase)
    #[serde(default)]
    pub reason: String,

    /// Human-readable message
    #[serde(default)]
    pub message: String,

    /// Last time the status flipped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<DateTime<Utc>>,

    /// Generation observed by the reconciler when the condition was set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,
}

impl Condition {
    /// Create a condition stamped with the current time.
    pub fn new(
        type_: impl Into<String>,
        status: ConditionStatus,
        reason: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            type_: type_.into(),
            status,
            reason: reason.into(),
            message: message.into(),
            last_transition_time: Some(Utc::now()),
            observed_generation: None,
        }
    }

    /// `Ready=True` with the given reason and message
    pub fn ready(reason: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ConditionType::Ready, ConditionStatus::True, reason, message)
    }

    /// `Failed=True` with the given reason and message
    pub fn failed(reason: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ConditionType::Failed, ConditionStatus::True, reason, message)
    }

    pub fn condition_type(&self) -> ConditionType {
        ConditionType::from_name(&self.type_)
    }

    pub fn is_true(&self) -> bool {
        self.status == ConditionStatus::True
    }
}

/// Find the first condition of the given type.
///
/// Mirrors `meta.FindStatusCondition`: when a type appears more than once the
/// earliest entry wins.
pub fn find_condition(conditions: &[Condition], type_: ConditionType) -> Option<&Condition> {
    conditions.iter().find(|c| c.condition_type() == type_)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_condition_type_round_trips() {
        let json = r#"{"type":"Progressing","status":"True","reason":"Reconciling","message":""}"#;
        let cond: Condition = serde_json::from_str(json).unwrap();
        assert_eq!(cond.condition_type(), ConditionType::Other);
        assert!(cond.is_true());

        let value = serde_json::to_value(&cond).unwrap();
        assert_eq!(value["type"], "Progressing");
    }

    #[test]
    fn test_condition_wire_shape() {
        let json = r#"{"type":"Ready","status":"False","reason":"Pending","message":"waiting","lastTransitionTime":"2024-01-01T00:00:00Z"}"#;
        let cond: Condition = serde_json::from_str(json).unwrap();
        assert_eq!(cond.condition_type(), ConditionType::Ready);
        assert_eq!(cond.status, ConditionStatus::False);
        assert_eq!(cond.reason, "Pending");
        assert!(cond.last_transition_time.is_some());
    }

    #[test]
    fn test_find_condition_first_match_wins() {
        let conditions = vec![
            Condition::new("Progressing", ConditionStatus::True, "Reconciling", ""),
            Condition::new(ConditionType::Ready, ConditionStatus::False, "First", ""),
            Condition::ready("Second", ""),
        ];
        let found = find_condition(&conditions, ConditionType::Ready).unwrap();
        assert_eq!(found.reason, "First");
        assert!(find_condition(&conditions, ConditionType::Failed).is_none());
    }
}
