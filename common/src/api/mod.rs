//! HTTP client contract for the `/api/mechanic` endpoints.
//!
//! The board never talks to the network itself. `HttpTransport` abstracts a
//! single request/response exchange so the browser build can plug in
//! `gloo-net` while tests plug in a recording mock. `MechanicClient` owns the
//! endpoint paths, the bearer header and the mapping of answers onto
//! `BoardError`.

use crate::error::{BoardError, Result};
use crate::model::{MechanicProfile, RequestStatus, ServiceRequest};
use crate::requests::{ErrorBody, RequestsPayload, UpdateStatusRequest};
use async_trait::async_trait;
use log::{debug, error};
use std::fmt;

/// Base path of every mechanic endpoint.
pub const API_PATH: &str = "/api/mechanic";

/// Generic message used when the server gives no reason for a refused update.
pub const UPDATE_FAILED: &str = "Failed to update request status";

/// Bearer token identifying the acting mechanic.
///
/// Passed explicitly to every operation instead of being read from a global.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Returns `None` for blank tokens, which count as "not signed in".
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    pub fn token(&self) -> &str {
        &self.0
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Patch,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Patch => "PATCH",
        }
    }
}

/// One outgoing request. `body` is JSON when present.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub authorization: String,
    pub body: Option<String>,
}

/// Buffered response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes HTTP exchanges.
///
/// The error string describes a failure to get any response at all (DNS,
/// connection refused, CORS). Non-2xx answers are returned as `Ok`.
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: ApiRequest) -> std::result::Result<ApiResponse, String>;
}

/// Typed client for the mechanic endpoints.
#[derive(Debug, Clone)]
pub struct MechanicClient<T> {
    transport: T,
    base_url: String,
}

impl<T: HttpTransport> MechanicClient<T> {
    /// `base_url` is prepended to every path; pass `""` for same-origin calls.
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn requests_url(&self) -> String {
        format!("{}{}/requests", self.base_url, API_PATH)
    }

    /// The id is percent-encoded as a single path segment.
    pub fn status_url(&self, request_id: &str) -> String {
        format!(
            "{}{}/requests/{}/status",
            self.base_url,
            API_PATH,
            urlencoding::encode(request_id)
        )
    }

    /// `GET /api/mechanic/requests`.
    pub async fn fetch_requests(
        &self,
        credential: &Credential,
    ) -> Result<(Vec<ServiceRequest>, Option<MechanicProfile>)> {
        let response = self
            .transport
            .send(ApiRequest {
                method: Method::Get,
                url: self.requests_url(),
                authorization: credential.bearer(),
                body: None,
            })
            .await
            .map_err(BoardError::Transport)?;

        if !response.is_success() {
            error!(
                "Error response ({}) fetching requests: {}",
                response.status, response.body
            );
            return Err(BoardError::Transport("Failed to fetch requests".to_string()));
        }

        let payload = RequestsPayload::parse(&response.body).map_err(|e| {
            error!("Malformed requests payload: {} (body: {})", e, response.body);
            BoardError::Transport(format!("Malformed requests payload: {}", e))
        })?;
        let (requests, profile) = payload.into_parts();
        debug!("Received {} service requests", requests.len());
        Ok((requests, profile))
    }

    /// `PATCH /api/mechanic/requests/{id}/status`.
    ///
    /// Any 2xx answer counts as success; the body is not needed because the
    /// board re-fetches the collection afterwards.
    pub async fn update_status(
        &self,
        credential: &Credential,
        request_id: &str,
        status: RequestStatus,
    ) -> Result<()> {
        let body = serde_json::to_string(&UpdateStatusRequest { status })
            .map_err(|e| BoardError::Transition(e.to_string()))?;

        debug!("Updating request status: {} -> {}", request_id, status);
        let response = self
            .transport
            .send(ApiRequest {
                method: Method::Patch,
                url: self.status_url(request_id),
                authorization: credential.bearer(),
                body: Some(body),
            })
            .await
            .map_err(BoardError::Transition)?;

        if response.is_success() {
            return Ok(());
        }

        let reason = serde_json::from_str::<ErrorBody>(&response.body)
            .ok()
            .and_then(|body| body.error)
            .filter(|reason| !reason.trim().is_empty())
            .unwrap_or_else(|| UPDATE_FAILED.to_string());
        error!(
            "Status update for {} refused ({}): {}",
            request_id, response.status, reason
        );
        Err(BoardError::Transition(reason))
    }
}
