//! Terminal outcome resolution from status conditions.
//!
//! Precedence is an ordered rule table. The first rule whose condition type is
//! present with status `True` decides the outcome, so a package that reports
//! both `Ready=True` and `Failed=True` while converging resolves to Ready.

use crds::{find_condition, Condition, ConditionType};
use std::fmt;

/// Kind of terminal outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Ready,
    Failed,
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeKind::Ready => f.write_str("Ready"),
            OutcomeKind::Failed => f.write_str("Failed"),
        }
    }
}

/// Terminal status of an install, taken from the deciding condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOutcome {
    kind: OutcomeKind,
    reason: String,
    message: String,
}

impl InstallOutcome {
    pub fn new(kind: OutcomeKind, reason: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
            message: message.into(),
        }
    }

    fn from_condition(kind: OutcomeKind, condition: &Condition) -> Self {
        Self::new(kind, condition.reason.clone(), condition.message.clone())
    }

    pub fn kind(&self) -> OutcomeKind {
        self.kind
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_ready(&self) -> bool {
        self.kind == OutcomeKind::Ready
    }
}

impl fmt::Display for InstallOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.kind, self.reason)?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

/// One row of the precedence table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionRule {
    pub condition: ConditionType,
    pub outcome: OutcomeKind,
}

/// Ready is checked before Failed.
pub const PRECEDENCE: &[ResolutionRule] = &[
    ResolutionRule {
        condition: ConditionType::Ready,
        outcome: OutcomeKind::Ready,
    },
    ResolutionRule {
        condition: ConditionType::Failed,
        outcome: OutcomeKind::Failed,
    },
];

/// Resolve the terminal outcome of a package, or `None` to keep waiting.
pub fn resolve(conditions: &[Condition]) -> Option<InstallOutcome> {
    resolve_with(PRECEDENCE, conditions)
}

/// Resolve against an explicit rule table, checked in order.
pub fn resolve_with(rules: &[ResolutionRule], conditions: &[Condition]) -> Option<InstallOutcome> {
    rules.iter().find_map(|rule| {
        find_condition(conditions, rule.condition)
            .filter(|c| c.is_true())
            .map(|c| InstallOutcome::from_condition(rule.outcome, c))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crds::ConditionStatus;

    fn cond(type_: impl Into<String>, status: ConditionStatus, reason: &str) -> Condition {
        Condition::new(type_, status, reason, format!("{} message", reason))
    }

    #[test]
    fn test_ready_wins_over_failed_in_any_order() {
        let ready = cond(ConditionType::Ready, ConditionStatus::True, "Installed");
        let failed = cond(ConditionType::Failed, ConditionStatus::True, "ManifestInvalid");

        for conditions in [vec![ready.clone(), failed.clone()], vec![failed, ready]] {
            let outcome = resolve(&conditions).unwrap();
            assert_eq!(outcome.kind(), OutcomeKind::Ready);
            assert_eq!(outcome.reason(), "Installed");
            assert_eq!(outcome.message(), "Installed message");
        }
    }

    #[test]
    fn test_failed_when_ready_not_true() {
        for ready_status in [ConditionStatus::False, ConditionStatus::Unknown] {
            let conditions = vec![
                cond(ConditionType::Ready, ready_status, "Pending"),
                cond(ConditionType::Failed, ConditionStatus::True, "ManifestInvalid"),
            ];
            let outcome = resolve(&conditions).unwrap();
            assert_eq!(outcome.kind(), OutcomeKind::Failed);
            assert_eq!(outcome.reason(), "ManifestInvalid");
        }
    }

    #[test]
    fn test_none_without_true_terminal_condition() {
        let statuses = [ConditionStatus::False, ConditionStatus::Unknown];
        for ready in statuses {
            for failed in statuses {
                let conditions = vec![
                    cond(ConditionType::Ready, ready, "A"),
                    cond(ConditionType::Failed, failed, "B"),
                    cond("Progressing", ConditionStatus::True, "Reconciling"),
                ];
                assert!(resolve(&conditions).is_none());
            }
        }
        assert!(resolve(&[]).is_none());
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let conditions = vec![cond(ConditionType::Failed, ConditionStatus::True, "Broken")];
        assert_eq!(resolve(&conditions), resolve(&conditions));
    }

    #[test]
    fn test_custom_rule_table() {
        let failed_first = [PRECEDENCE[1], PRECEDENCE[0]];
        let conditions = vec![
            cond(ConditionType::Ready, ConditionStatus::True, "Installed"),
            cond(ConditionType::Failed, ConditionStatus::True, "ManifestInvalid"),
        ];
        let outcome = resolve_with(&failed_first, &conditions).unwrap();
        assert_eq!(outcome.kind(), OutcomeKind::Failed);
    }

    #[test]
    fn test_outcome_display() {
        let outcome = InstallOutcome::new(OutcomeKind::Failed, "ManifestInvalid", "bad chart");
        assert_eq!(outcome.to_string(), "Failed (ManifestInvalid): bad chart");
        let outcome = InstallOutcome::new(OutcomeKind::Ready, "Installed", "");
        assert_eq!(outcome.to_string(), "Ready (Installed)");
    }
}
