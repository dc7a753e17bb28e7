use actix_web::HttpResponse;
use common::requests::ErrorBody;
use log::error;
use thiserror::Error;

/// Failures of the mechanic endpoints. Every variant answers with an
/// `{"error": "..."}` body, which the dashboard shows verbatim.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

impl ApiError {
    pub fn to_response(&self) -> HttpResponse {
        let body = ErrorBody::new(self.to_string());
        match self {
            ApiError::Unauthorized(_) => HttpResponse::Unauthorized().json(body),
            ApiError::NotFound(_) => HttpResponse::NotFound().json(body),
            ApiError::BadRequest(_) => HttpResponse::BadRequest().json(body),
            ApiError::Conflict(_) => HttpResponse::Conflict().json(body),
            ApiError::Database(e) => {
                error!("Database failure: {}", e);
                HttpResponse::InternalServerError().json(ErrorBody::new("Internal server error"))
            }
        }
    }
}
