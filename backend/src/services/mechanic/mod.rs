//! # Mechanic Service Module
//!
//! Endpoints behind the mechanic dashboard, mounted under `/api/mechanic`.
//! Every route requires `Authorization: Bearer <token>`; the token selects the
//! acting mechanic and every query is scoped to that mechanic's requests.
//!
//! ## Sub-modules:
//! - `list`: the full current set of the mechanic's service requests.
//! - `update_status`: moves one request along the lifecycle.
//! - `auth`: bearer token resolution.
//! - `error`: the `ApiError` type and its `{"error": ...}` responses.

mod auth;
mod error;
mod list;
mod update_status;

use actix_web::web::{get, patch, scope};
use actix_web::Scope;

/// The base path for all mechanic endpoints.
pub const API_PATH: &str = common::api::API_PATH;

/// Configures and returns the Actix `Scope` for the mechanic routes.
///
/// # Registered Routes:
///
/// *   **`GET /requests`**:
///     - **Handler**: `list::process`
///     - **Description**: Returns the mechanic's requests as a JSON array,
///       newest first, with `userId` and `vehicleId` populated.
///
/// *   **`PATCH /requests/{id}/status`**:
///     - **Handler**: `update_status::process`
///     - **Description**: Expects `{"status": "<Status>"}`. Only the moves
///       `Pending -> Accepted | Rejected` and `Accepted -> Completed` are
///       accepted. Answers with the updated request.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/requests", get().to(list::process))
        .route("/requests/{request_id}/status", patch().to(update_status::process))
}

#[cfg(test)]
mod tests;
