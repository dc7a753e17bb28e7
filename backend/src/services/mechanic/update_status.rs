//! # Status Update Service
//!
//! Backs `PATCH /api/mechanic/requests/{request_id}/status`.
//!
//! The body is parsed by hand rather than through `web::Json` so that a bad
//! body still answers with the `{"error": ...}` shape the dashboard displays.
//! The request must belong to the authenticated mechanic and the move must be
//! allowed by `RequestStatus::can_transition_to`; `updatedAt` is set to now.
//! The write only lands if the status is still the one checked, so of two
//! racing updates the later one gets `409`.

use super::auth::authenticate;
use super::error::ApiError;
use crate::db::{self, Database};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use common::model::RequestStatus;
use common::requests::UpdateStatusResponse;
use log::info;
use serde::Deserialize;

/// Loose view of the body, so unknown status names get a readable error.
#[derive(Deserialize)]
struct RawStatusBody {
    status: Option<String>,
}

/// Actix handler for `PATCH /api/mechanic/requests/{request_id}/status`.
pub async fn process(
    req: HttpRequest,
    request_id: web::Path<String>,
    body: web::Bytes,
    database: web::Data<Database>,
) -> HttpResponse {
    match update_status(&req, &request_id, &body, &database) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => e.to_response(),
    }
}

fn parse_status(body: &[u8]) -> Result<RequestStatus, ApiError> {
    let raw: RawStatusBody = serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {}", e)))?;
    raw.status
        .ok_or_else(|| ApiError::BadRequest("Missing status".to_string()))?
        .parse::<RequestStatus>()
        .map_err(ApiError::BadRequest)
}

fn update_status(
    req: &HttpRequest,
    request_id: &str,
    body: &[u8],
    database: &Database,
) -> Result<UpdateStatusResponse, ApiError> {
    let mechanic = authenticate(req, database)?;
    let target = parse_status(body)?;

    let conn = database.open()?;
    let current = db::get_request(&conn, &mechanic.id, request_id)?
        .ok_or_else(|| ApiError::NotFound("Service request not found".to_string()))?;

    if !current.status.can_transition_to(target) {
        return Err(ApiError::BadRequest(format!(
            "Cannot change status from {} to {}",
            current.status, target
        )));
    }

    let changed = db::set_status(&conn, &mechanic.id, request_id, current.status, target, Utc::now())?;
    if changed == 0 {
        return Err(ApiError::Conflict(format!(
            "Request status changed from {} by another update",
            current.status
        )));
    }
    let request = db::get_request(&conn, &mechanic.id, request_id)?
        .ok_or_else(|| ApiError::NotFound("Service request not found".to_string()))?;

    info!(
        "Mechanic {} moved request {} from {} to {}",
        mechanic.id, request_id, current.status, target
    );
    Ok(UpdateStatusResponse {
        message: format!("Request status updated to {}", target),
        request,
    })
}
