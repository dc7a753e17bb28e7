use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a service request.
///
/// The wire form is the variant name (`"Pending"`, `"OnTheWay"`, ...), which is
/// also what the status update endpoint expects in its `status` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestStatus {
    /// Created by the customer, waiting for the mechanic to answer.
    Pending,
    /// The mechanic took the job.
    Accepted,
    /// The mechanic declined the job. Terminal.
    Rejected,
    /// The job is done. Terminal.
    Completed,
    /// The customer withdrew the request. Terminal.
    Cancelled,
    /// Legacy state set outside this board. Counted as active, never offered.
    OnTheWay,
    /// Legacy state set outside this board. Counted as active, never offered.
    InProgress,
}

impl RequestStatus {
    /// Every status the backend may report, in display order.
    pub const ALL: [RequestStatus; 7] = [
        RequestStatus::Pending,
        RequestStatus::Accepted,
        RequestStatus::OnTheWay,
        RequestStatus::InProgress,
        RequestStatus::Completed,
        RequestStatus::Rejected,
        RequestStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Accepted => "Accepted",
            RequestStatus::Rejected => "Rejected",
            RequestStatus::Completed => "Completed",
            RequestStatus::Cancelled => "Cancelled",
            RequestStatus::OnTheWay => "OnTheWay",
            RequestStatus::InProgress => "InProgress",
        }
    }

    /// Statuses a mechanic can move a request to from `self`.
    ///
    /// `OnTheWay` and `InProgress` are never returned: they are recognized
    /// but owned by another part of the system.
    pub fn next_statuses(&self) -> &'static [RequestStatus] {
        match self {
            RequestStatus::Pending => &[RequestStatus::Accepted, RequestStatus::Rejected],
            RequestStatus::Accepted => &[RequestStatus::Completed],
            _ => &[],
        }
    }

    pub fn can_transition_to(&self, target: RequestStatus) -> bool {
        self.next_statuses().contains(&target)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RequestStatus::Completed | RequestStatus::Rejected | RequestStatus::Cancelled
        )
    }

    /// Counted by `DerivedStats::active_requests`.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            RequestStatus::Pending
                | RequestStatus::Accepted
                | RequestStatus::OnTheWay
                | RequestStatus::InProgress
        )
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RequestStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown request status '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_offers_accept_and_reject() {
        assert_eq!(
            RequestStatus::Pending.next_statuses(),
            &[RequestStatus::Accepted, RequestStatus::Rejected]
        );
        assert!(RequestStatus::Accepted.can_transition_to(RequestStatus::Completed));
        assert!(!RequestStatus::Pending.can_transition_to(RequestStatus::Completed));
    }

    #[test]
    fn terminal_and_legacy_states_offer_nothing() {
        for status in [
            RequestStatus::Completed,
            RequestStatus::Rejected,
            RequestStatus::Cancelled,
            RequestStatus::OnTheWay,
            RequestStatus::InProgress,
        ] {
            assert!(status.next_statuses().is_empty(), "{status} offered a transition");
        }
        assert!(RequestStatus::Cancelled.is_terminal());
        assert!(!RequestStatus::InProgress.is_terminal());
    }

    #[test]
    fn parses_wire_names() {
        assert_eq!("OnTheWay".parse::<RequestStatus>(), Ok(RequestStatus::OnTheWay));
        assert!("accepted".parse::<RequestStatus>().is_err());
        let json = serde_json::to_string(&RequestStatus::InProgress).unwrap();
        assert_eq!(json, "\"InProgress\"");
    }
}
