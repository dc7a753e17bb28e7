//! Bearer-token authentication for the mechanic endpoints.
//!
//! Tokens are issued elsewhere; here a token is only looked up in the
//! `mechanics` table.

use super::error::ApiError;
use crate::db::{self, Database, MechanicRecord};
use actix_web::http::header::AUTHORIZATION;
use actix_web::HttpRequest;

/// Extracts the token from `Authorization: Bearer <token>`.
pub fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

pub fn authenticate(req: &HttpRequest, database: &Database) -> Result<MechanicRecord, ApiError> {
    let token = bearer_token(req)
        .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?;
    let conn = database.open()?;
    db::find_mechanic_by_token(&conn, token)?
        .ok_or_else(|| ApiError::Unauthorized("Invalid or expired token".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn reads_bearer_tokens_only() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer abc"))
            .to_http_request();
        assert_eq!(bearer_token(&req), Some("abc"));

        let basic = TestRequest::default()
            .insert_header((AUTHORIZATION, "Basic abc"))
            .to_http_request();
        assert_eq!(bearer_token(&basic), None);

        let blank = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer   "))
            .to_http_request();
        assert_eq!(bearer_token(&blank), None);

        assert_eq!(bearer_token(&TestRequest::default().to_http_request()), None);
    }
}
