use async_trait::async_trait;
use common::api::{ApiRequest, ApiResponse, Credential, HttpTransport, MechanicClient, Method};
use common::board::filter::Tab;
use common::board::{Controller, FetchOutcome};
use common::model::RequestStatus;
use common::BoardError;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// Records every request and answers from per-route FIFO queues.
#[derive(Clone, Default)]
struct MockTransport {
    responses: Arc<Mutex<HashMap<String, VecDeque<Result<ApiResponse, String>>>>>,
    calls: Arc<Mutex<Vec<ApiRequest>>>,
}

impl MockTransport {
    fn add_response(&self, key: &str, status: u16, body: &str) {
        self.responses
            .lock()
            .entry(key.to_string())
            .or_default()
            .push_back(Ok(ApiResponse {
                status,
                body: body.to_string(),
            }));
    }

    fn add_failure(&self, key: &str, reason: &str) {
        self.responses
            .lock()
            .entry(key.to_string())
            .or_default()
            .push_back(Err(reason.to_string()));
    }

    fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().clone()
    }
}

#[async_trait(?Send)]
impl HttpTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, String> {
        let key = format!("{} {}", request.method.as_str(), request.url);
        self.calls.lock().push(request);
        self.responses
            .lock()
            .get_mut(&key)
            .and_then(|queue| queue.pop_front())
            .unwrap_or_else(|| Err(format!("No mock response configured for {}", key)))
    }
}

const LIST: &str = "GET /api/mechanic/requests";

fn controller() -> (Controller<MockTransport>, MockTransport) {
    let transport = MockTransport::default();
    let client = MechanicClient::new(transport.clone(), "");
    (Controller::new(client), transport)
}

fn token() -> Option<Credential> {
    Credential::new("mechanic-token")
}

fn pending_one() -> &'static str {
    r#"[{"_id":"1","status":"Pending","vehicleId":{"make":"Seat","model":"Ibiza","year":"2015","licensePlate":"AB12"}}]"#
}

#[tokio::test]
async fn loads_with_bearer_header() {
    let (mut controller, transport) = controller();
    transport.add_response(LIST, 200, pending_one());

    let outcome = controller.refresh(token()).await;

    assert_eq!(outcome, FetchOutcome::Loaded(1));
    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, Method::Get);
    assert_eq!(calls[0].authorization, "Bearer mechanic-token");
    assert!(calls[0].body.is_none());

    let board = controller.board_mut();
    board.set_query("ab12");
    board.set_tab(Tab::Pending);
    assert_eq!(board.visible().len(), 1);
    board.set_query("zz");
    assert!(board.visible().is_empty());
}

#[tokio::test]
async fn missing_credential_makes_no_call() {
    let (mut controller, transport) = controller();

    let outcome = controller.refresh(None).await;

    assert_eq!(outcome, FetchOutcome::Failed(BoardError::Auth));
    assert!(transport.calls().is_empty());
    assert!(controller.board().requests().is_empty());
    assert!(!controller.board().is_loading());
}

#[tokio::test]
async fn non_success_fetch_surfaces_transport_error() {
    let (mut controller, transport) = controller();
    transport.add_response(LIST, 200, pending_one());
    transport.add_response(LIST, 500, "<html>boom</html>");

    controller.refresh(token()).await;
    let outcome = controller.refresh(token()).await;

    assert_eq!(
        outcome,
        FetchOutcome::Failed(BoardError::Transport("Failed to fetch requests".to_string()))
    );
    assert!(controller.board().requests().is_empty());
    assert_eq!(controller.board().error(), Some("Failed to fetch requests"));
    assert!(!controller.board().is_loading());
}

#[tokio::test]
async fn malformed_payload_is_a_transport_error() {
    let (mut controller, transport) = controller();
    transport.add_response(LIST, 200, "{not json");

    let outcome = controller.refresh(token()).await;

    assert!(matches!(outcome, FetchOutcome::Failed(BoardError::Transport(_))));
    assert!(controller.board().error().is_some());
}

#[tokio::test]
async fn network_failure_is_a_transport_error() {
    let (mut controller, transport) = controller();
    transport.add_failure(LIST, "connection refused");

    let outcome = controller.refresh(token()).await;

    assert_eq!(
        outcome,
        FetchOutcome::Failed(BoardError::Transport("connection refused".to_string()))
    );
}

#[tokio::test]
async fn successful_transition_refetches_and_trusts_server() {
    let (mut controller, transport) = controller();
    transport.add_response(LIST, 200, pending_one());
    transport.add_response(
        "PATCH /api/mechanic/requests/1/status",
        200,
        r#"{"message":"ok","request":{"_id":"1","status":"Accepted"}}"#,
    );
    // The re-fetch still reports Pending; that is what must be displayed.
    transport.add_response(LIST, 200, pending_one());

    controller.refresh(token()).await;
    controller.board_mut().open_details("1");
    let notice = controller
        .update_status(token(), "1", RequestStatus::Accepted)
        .await;

    assert_eq!(notice.title, "Success");
    assert_eq!(notice.description, "Request status updated to Accepted");
    let calls = transport.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[1].method, Method::Patch);
    assert_eq!(calls[1].body.as_deref(), Some(r#"{"status":"Accepted"}"#));
    assert_eq!(calls[2].method, Method::Get);

    let board = controller.board();
    assert_eq!(board.request("1").unwrap().status, RequestStatus::Pending);
    assert!(board.selected().is_none());
    assert!(!board.is_loading());
}

#[tokio::test]
async fn refused_transition_uses_server_reason_and_keeps_state() {
    let (mut controller, transport) = controller();
    transport.add_response(LIST, 200, pending_one());
    transport.add_response(
        "PATCH /api/mechanic/requests/1/status",
        400,
        r#"{"error":"Cannot move a Pending request to Completed"}"#,
    );

    controller.refresh(token()).await;
    let before = controller.board().requests().to_vec();
    let notice = controller
        .update_status(token(), "1", RequestStatus::Completed)
        .await;

    assert!(notice.is_destructive());
    assert_eq!(notice.description, "Cannot move a Pending request to Completed");
    assert_eq!(controller.board().requests(), before.as_slice());
    // No re-fetch after a failure.
    assert_eq!(transport.calls().len(), 2);
    assert!(!controller.board().is_loading());
}

#[tokio::test]
async fn refused_transition_without_reason_gets_generic_message() {
    let (mut controller, transport) = controller();
    transport.add_response("PATCH /api/mechanic/requests/9/status", 502, "Bad Gateway");

    let notice = controller
        .update_status(token(), "9", RequestStatus::Rejected)
        .await;

    assert_eq!(notice.description, "Failed to update request status");
}

#[tokio::test]
async fn transition_without_credential_sends_nothing() {
    let (mut controller, transport) = controller();

    let notice = controller
        .update_status(None, "1", RequestStatus::Accepted)
        .await;

    assert!(notice.is_destructive());
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn wrapped_payload_stats_override_local_counts() {
    let (mut controller, transport) = controller();
    transport.add_response(
        LIST,
        200,
        r#"{"requests":[{"_id":"1","status":"Completed"}],
            "mechanic":{"_id":"m","name":"Luis","totalRequests":50,"activeRequests":5,"completedServices":45}}"#,
    );

    controller.refresh(token()).await;

    let stats = controller.board().stats();
    assert_eq!(stats.total_requests, 50);
    assert_eq!(stats.completed_services, 45);
}
