use super::configure_routes;
use crate::db::testing::{insert_mechanic, insert_request, temp_database};
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use common::model::{RequestStatus, ServiceRequest};
use common::requests::{ErrorBody, UpdateStatusResponse};

const CREATED: &str = "2024-01-01T08:00:00.000Z";

macro_rules! app {
    ($db:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($db.clone()))
                .service(configure_routes()),
        )
        .await
    };
}

fn patch_status(id: &str, token: &str, body: &str) -> test::TestRequest {
    test::TestRequest::patch()
        .uri(&format!("/api/mechanic/requests/{}/status", id))
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .insert_header(("Content-Type", "application/json"))
        .set_payload(body.to_string())
}

#[actix_web::test]
async fn list_requires_a_known_token() {
    let (db, _dir) = temp_database();
    insert_mechanic(&db, "m1", "t1");
    let app = app!(db);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/mechanic/requests").to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(body.error.as_deref(), Some("Authentication required"));

    let req = test::TestRequest::get()
        .uri("/api/mechanic/requests")
        .insert_header(("Authorization", "Bearer wrong"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn list_returns_bare_array_of_own_requests() {
    let (db, _dir) = temp_database();
    insert_mechanic(&db, "m1", "t1");
    insert_mechanic(&db, "m2", "t2");
    insert_request(&db, "r1", "m1", RequestStatus::Pending, CREATED);
    insert_request(&db, "r2", "m2", RequestStatus::Pending, CREATED);
    let app = app!(db);

    let req = test::TestRequest::get()
        .uri("/api/mechanic/requests")
        .insert_header(("Authorization", "Bearer t1"))
        .to_request();
    let requests: Vec<ServiceRequest> = test::call_and_read_body_json(&app, req).await;

    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].id, "r1");
    assert_eq!(requests[0].customer_name(), "Ana Ruiz");
}

#[actix_web::test]
async fn accepting_a_pending_request_updates_it() {
    let (db, _dir) = temp_database();
    insert_mechanic(&db, "m1", "t1");
    insert_request(&db, "r1", "m1", RequestStatus::Pending, CREATED);
    let app = app!(db);

    let resp = test::call_service(&app, patch_status("r1", "t1", r#"{"status":"Accepted"}"#).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: UpdateStatusResponse = test::read_body_json(resp).await;
    assert_eq!(body.request.status, RequestStatus::Accepted);
    assert_eq!(body.message, "Request status updated to Accepted");
    assert!(body.request.updated_at > body.request.created_at);

    let resp = test::call_service(&app, patch_status("r1", "t1", r#"{"status":"Completed"}"#).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn illegal_moves_are_refused_with_reason() {
    let (db, _dir) = temp_database();
    insert_mechanic(&db, "m1", "t1");
    insert_request(&db, "r1", "m1", RequestStatus::Pending, CREATED);
    insert_request(&db, "r2", "m1", RequestStatus::Completed, CREATED);
    let app = app!(db);

    let resp = test::call_service(&app, patch_status("r1", "t1", r#"{"status":"Completed"}"#).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(body.error.as_deref(), Some("Cannot change status from Pending to Completed"));

    let resp = test::call_service(&app, patch_status("r2", "t1", r#"{"status":"Accepted"}"#).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(&app, patch_status("r1", "t1", r#"{"status":"OnTheWay"}"#).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn bad_bodies_and_foreign_ids_are_rejected() {
    let (db, _dir) = temp_database();
    insert_mechanic(&db, "m1", "t1");
    insert_mechanic(&db, "m2", "t2");
    insert_request(&db, "r1", "m1", RequestStatus::Pending, CREATED);
    let app = app!(db);

    let resp = test::call_service(&app, patch_status("r1", "t2", r#"{"status":"Accepted"}"#).to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(&app, patch_status("r1", "t1", r#"{"status":"Done"}"#).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(body.error.as_deref(), Some("Unknown request status 'Done'"));

    let resp = test::call_service(&app, patch_status("r1", "t1", "{}").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(&app, patch_status("r1", "t1", "not json").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
