//! Bodies exchanged with the `/api/mechanic` endpoints.

use crate::model::{MechanicProfile, RequestStatus, ServiceRequest};
use serde::{Deserialize, Serialize};

/// Request payload for `PATCH /api/mechanic/requests/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: RequestStatus,
}

/// Success body of the status update endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusResponse {
    pub message: String,
    pub request: ServiceRequest,
}

/// Failure body used by every mechanic endpoint. `error` is shown verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
        }
    }
}

/// Body of `GET /api/mechanic/requests`.
///
/// The endpoint answers with a bare array; a wrapped form carrying the
/// mechanic profile is accepted as well.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestsPayload {
    List(Vec<ServiceRequest>),
    Wrapped {
        requests: Vec<ServiceRequest>,
        #[serde(default)]
        mechanic: Option<MechanicProfile>,
    },
}

impl RequestsPayload {
    /// Parses a response body. Blank or `null` bodies mean "no requests".
    pub fn parse(body: &str) -> Result<Self, serde_json::Error> {
        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Ok(RequestsPayload::List(Vec::new()));
        }
        serde_json::from_str(trimmed)
    }

    pub fn into_parts(self) -> (Vec<ServiceRequest>, Option<MechanicProfile>) {
        match self {
            RequestsPayload::List(requests) => (requests, None),
            RequestsPayload::Wrapped { requests, mechanic } => (requests, mechanic),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_array_has_no_profile() {
        let payload = RequestsPayload::parse(r#"[{"_id":"1","status":"Pending"}]"#).unwrap();
        let (requests, profile) = payload.into_parts();
        assert_eq!(requests.len(), 1);
        assert!(profile.is_none());
    }

    #[test]
    fn wrapped_payload_carries_profile() {
        let body = r#"{
            "requests": [{"_id":"1","status":"Accepted"}],
            "mechanic": {"_id":"m1","name":"Luis","totalRequests":9,"activeRequests":2,"completedServices":7}
        }"#;
        let (requests, profile) = RequestsPayload::parse(body).unwrap().into_parts();
        assert_eq!(requests[0].status, RequestStatus::Accepted);
        assert_eq!(profile.unwrap().completed_services, 7);
    }

    #[test]
    fn null_and_blank_bodies_are_empty() {
        for body in ["", "  ", "null"] {
            let (requests, profile) = RequestsPayload::parse(body).unwrap().into_parts();
            assert!(requests.is_empty());
            assert!(profile.is_none());
        }
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(RequestsPayload::parse("{\"oops\": true").is_err());
        assert!(RequestsPayload::parse("{\"error\": \"denied\"}").is_err());
        assert!(RequestsPayload::parse("[{\"_id\": 1}]").is_err());
    }
}
