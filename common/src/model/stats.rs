use crate::model::service_request::ServiceRequest;
use crate::model::status::RequestStatus;
use serde::{Deserialize, Serialize};

/// Aggregate counters shown in the dashboard header cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DerivedStats {
    pub total_requests: usize,
    pub active_requests: usize,
    pub completed_services: usize,
}

impl DerivedStats {
    /// Pure function of the collection.
    pub fn from_requests(requests: &[ServiceRequest]) -> Self {
        Self {
            total_requests: requests.len(),
            active_requests: requests.iter().filter(|r| r.status.is_active()).count(),
            completed_services: requests
                .iter()
                .filter(|r| r.status == RequestStatus::Completed)
                .count(),
        }
    }
}

/// Mechanic profile the list endpoint may attach to its payload.
///
/// When present, its counters are taken verbatim instead of the locally
/// computed ones. Nothing checks that both agree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MechanicProfile {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub contact_number: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub specialization: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub total_requests: usize,
    #[serde(default)]
    pub active_requests: usize,
    #[serde(default)]
    pub completed_services: usize,
}

impl MechanicProfile {
    pub fn stats(&self) -> DerivedStats {
        DerivedStats {
            total_requests: self.total_requests,
            active_requests: self.active_requests,
            completed_services: self.completed_services,
        }
    }
}

/// Where the board's current counters came from.
#[derive(Debug, Clone, PartialEq)]
pub enum StatsSource {
    Local(DerivedStats),
    Server(MechanicProfile),
}

impl StatsSource {
    /// A server profile wins over local computation.
    pub fn resolve(requests: &[ServiceRequest], profile: Option<MechanicProfile>) -> Self {
        match profile {
            Some(profile) => StatsSource::Server(profile),
            None => StatsSource::Local(DerivedStats::from_requests(requests)),
        }
    }

    pub fn stats(&self) -> DerivedStats {
        match self {
            StatsSource::Local(stats) => *stats,
            StatsSource::Server(profile) => profile.stats(),
        }
    }

    pub fn profile(&self) -> Option<&MechanicProfile> {
        match self {
            StatsSource::Server(profile) => Some(profile),
            StatsSource::Local(_) => None,
        }
    }
}

impl Default for StatsSource {
    fn default() -> Self {
        StatsSource::Local(DerivedStats::default())
    }
}
