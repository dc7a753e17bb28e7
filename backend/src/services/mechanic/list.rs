use super::auth::authenticate;
use super::error::ApiError;
use crate::db::{self, Database};
use actix_web::{web, HttpRequest, HttpResponse};
use common::model::ServiceRequest;
use log::info;

/// Actix handler for `GET /api/mechanic/requests`.
pub async fn process(req: HttpRequest, database: web::Data<Database>) -> HttpResponse {
    match list_requests(&req, &database) {
        Ok(requests) => HttpResponse::Ok().json(requests),
        Err(e) => e.to_response(),
    }
}

fn list_requests(req: &HttpRequest, database: &Database) -> Result<Vec<ServiceRequest>, ApiError> {
    let mechanic = authenticate(req, database)?;
    let conn = database.open()?;
    let requests = db::list_requests(&conn, &mechanic.id)?;
    info!("Listing {} requests for mechanic {}", requests.len(), mechanic.id);
    Ok(requests)
}
