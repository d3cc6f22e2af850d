use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The visible part of a push notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

/// One multicast payload: notification, click-routing data, and the
/// destination token list.
///
/// Constructed fresh per pipeline run and never persisted. The token list is
/// expected to be deduplicated and free of empty entries by the time it
/// reaches a transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MulticastMessage {
    pub notification: Notification,

    /// String-to-string routing metadata delivered alongside the notification.
    pub data: BTreeMap<String, String>,

    pub tokens: Vec<String>,
}

/// Per-token result of one multicast call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenOutcome {
    pub token: String,
    /// Transport error code for this token, `None` on success.
    pub error: Option<String>,
}

/// Aggregate outcome of a dispatch, possibly spanning several batched calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub success_count: usize,
    pub failure_count: usize,
    /// Per-token outcomes in the order the tokens were sent. Consumed only
    /// for logging — no remediation loop reads these.
    pub outcomes: Vec<TokenOutcome>,
}

impl DispatchReport {
    /// Fold another batch's report into this one.
    pub fn merge(&mut self, other: DispatchReport) {
        self.success_count += other.success_count;
        self.failure_count += other.failure_count;
        self.outcomes.extend(other.outcomes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_sums_counts_and_appends_outcomes() {
        let mut report = DispatchReport {
            success_count: 2,
            failure_count: 1,
            outcomes: vec![TokenOutcome {
                token: "tA".into(),
                error: None,
            }],
        };
        report.merge(DispatchReport {
            success_count: 1,
            failure_count: 0,
            outcomes: vec![TokenOutcome {
                token: "tB".into(),
                error: None,
            }],
        });

        assert_eq!(report.success_count, 3);
        assert_eq!(report.failure_count, 1);
        assert_eq!(report.outcomes.len(), 2);
    }
}
