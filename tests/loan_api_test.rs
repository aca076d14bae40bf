use axum::body::Body;
use axum::http::{Request, StatusCode};
use library_loan_api::adapters::memory::InMemoryLoanStore;
use library_loan_api::adapters::mock::MockMemberDirectory;
use library_loan_api::api::handlers::AppState;
use library_loan_api::api::router::create_router;
use library_loan_api::api::types::CommandResult;
use library_loan_api::application::loan::{LoanDetail, ServiceDependencies};
use library_loan_api::ports::{LoanRecord, Member};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

// ============================================================================
// Test helpers
// ============================================================================

/// Build the real router backed by in-memory adapters.
///
/// The member directory is returned so tests can seed members.
fn setup_app() -> (axum::Router, Arc<MockMemberDirectory>) {
    let loan_store = Arc::new(InMemoryLoanStore::new());
    let member_directory = Arc::new(MockMemberDirectory::new());

    let service_deps = ServiceDependencies {
        loan_store,
        member_directory: member_directory.clone(),
    };

    let app_state = Arc::new(AppState { service_deps });

    (create_router(app_state), member_directory)
}

fn member(id: i64) -> Member {
    Member {
        id,
        name: format!("Member {}", id),
        email: format!("member{}@example.org", id),
    }
}

async fn send(app: &axum::Router, method: &str, uri: &str, body: Option<serde_json::Value>) -> axum::response::Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

async fn read_body(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

/// Create a loan through the API and return the assigned id.
async fn create_loan(app: &axum::Router, member_id: i64, book_id: i64) -> i64 {
    let response = send(
        app,
        "POST",
        "/api/loans",
        Some(json!({ "memberId": member_id, "bookId": book_id })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let result: CommandResult = serde_json::from_slice(&read_body(response).await).unwrap();
    assert!(result.success);
    result.id.expect("created loan must carry an id")
}

// ============================================================================
// Read endpoints
// ============================================================================

#[tokio::test]
async fn test_list_loans_empty() {
    let (app, _members) = setup_app();

    let response = send(&app, "GET", "/api/loans", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let loans: Vec<LoanRecord> = serde_json::from_slice(&read_body(response).await).unwrap();
    assert!(loans.is_empty());
}

#[tokio::test]
async fn test_list_loans_returns_all_records() {
    let (app, members) = setup_app();
    members.add_member(member(1));
    members.add_member(member(2));

    create_loan(&app, 1, 10).await;
    create_loan(&app, 2, 20).await;

    let response = send(&app, "GET", "/api/loans", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let loans: Vec<LoanRecord> = serde_json::from_slice(&read_body(response).await).unwrap();
    assert_eq!(loans.len(), 2);
}

#[tokio::test]
async fn test_get_loan_by_id_found() {
    let (app, members) = setup_app();
    members.add_member(member(1));
    let loan_id = create_loan(&app, 1, 10).await;

    let response = send(&app, "GET", &format!("/api/loans/{}", loan_id), None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let loan: LoanRecord = serde_json::from_slice(&read_body(response).await).unwrap();
    assert_eq!(loan.id, Some(loan_id));
    assert_eq!(loan.member_id, 1);
    assert_eq!(loan.book_id, 10);
}

#[tokio::test]
async fn test_get_loan_by_id_not_found_has_empty_body() {
    let (app, _members) = setup_app();

    let response = send(&app, "GET", "/api/loans/9999", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(read_body(response).await.is_empty());
}

#[tokio::test]
async fn test_get_loan_with_member_details() {
    let (app, members) = setup_app();
    members.add_member(member(7));
    let loan_id = create_loan(&app, 7, 42).await;

    let response = send(&app, "GET", &format!("/api/loans/anggota/{}", loan_id), None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let details: Vec<LoanDetail> = serde_json::from_slice(&read_body(response).await).unwrap();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0].loan.id, Some(loan_id));
    assert_eq!(details[0].member.id, 7);
    assert_eq!(details[0].member.name, "Member 7");
}

#[tokio::test]
async fn test_get_loan_with_member_details_missing_loan_is_empty_list() {
    let (app, _members) = setup_app();

    let response = send(&app, "GET", "/api/loans/anggota/9999", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let details: Vec<LoanDetail> = serde_json::from_slice(&read_body(response).await).unwrap();
    assert!(details.is_empty());
}

#[tokio::test]
async fn test_list_loans_by_member() {
    let (app, members) = setup_app();
    members.add_member(member(1));
    members.add_member(member(2));

    create_loan(&app, 1, 10).await;
    create_loan(&app, 1, 11).await;
    create_loan(&app, 2, 20).await;

    let response = send(&app, "GET", "/api/loans/by-anggota/1", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let loans: Vec<LoanRecord> = serde_json::from_slice(&read_body(response).await).unwrap();
    assert_eq!(loans.len(), 2);
    assert!(loans.iter().all(|l| l.member_id == 1));
}

#[tokio::test]
async fn test_list_loans_by_member_empty_is_not_found() {
    let (app, _members) = setup_app();

    let response = send(&app, "GET", "/api/loans/by-anggota/1", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(read_body(response).await.is_empty());
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_create_loan_returns_command_result() {
    let (app, members) = setup_app();
    members.add_member(member(5));

    let response = send(
        &app,
        "POST",
        "/api/loans",
        Some(json!({ "memberId": 5, "bookId": 9 })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let result: CommandResult = serde_json::from_slice(&read_body(response).await).unwrap();
    assert!(result.success);
    assert!(result.id.is_some());
    assert_eq!(result.message, "loan created successfully");
}

#[tokio::test]
async fn test_create_duplicate_active_loan_is_rejected() {
    let (app, members) = setup_app();
    members.add_member(member(5));
    create_loan(&app, 5, 9).await;

    // Same member, same book, first loan still active
    let response = send(
        &app,
        "POST",
        "/api/loans",
        Some(json!({ "memberId": 5, "bookId": 9 })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let result: CommandResult = serde_json::from_slice(&read_body(response).await).unwrap();
    assert!(!result.success);
    assert!(result.id.is_none());
    assert_eq!(result.message, "duplicate active loan");
}

#[tokio::test]
async fn test_create_loan_unknown_member_is_rejected() {
    let (app, _members) = setup_app();

    let response = send(
        &app,
        "POST",
        "/api/loans",
        Some(json!({ "memberId": 5, "bookId": 9 })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let result: CommandResult = serde_json::from_slice(&read_body(response).await).unwrap();
    assert!(!result.success);
    assert!(result.message.contains("member 5 not found"));
}

#[tokio::test]
async fn test_create_loan_non_positive_ids_are_rejected() {
    let (app, _members) = setup_app();

    let response = send(
        &app,
        "POST",
        "/api/loans",
        Some(json!({ "memberId": 0, "bookId": 9 })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let result: CommandResult = serde_json::from_slice(&read_body(response).await).unwrap();
    assert!(!result.success);
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn test_update_loan_existing() {
    let (app, members) = setup_app();
    members.add_member(member(1));
    let loan_id = create_loan(&app, 1, 10).await;

    let response = send(
        &app,
        "PUT",
        &format!("/api/loans/{}", loan_id),
        Some(json!({ "memberId": 1, "bookId": 11 })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let result: CommandResult = serde_json::from_slice(&read_body(response).await).unwrap();
    assert!(result.success);
    assert_eq!(result.id, Some(loan_id));
    assert_eq!(result.message, "loan updated successfully");

    // The replacement is visible on the next read
    let response = send(&app, "GET", &format!("/api/loans/{}", loan_id), None).await;
    let loan: LoanRecord = serde_json::from_slice(&read_body(response).await).unwrap();
    assert_eq!(loan.book_id, 11);
}

#[tokio::test]
async fn test_update_loan_not_found_has_empty_body() {
    let (app, _members) = setup_app();

    let response = send(
        &app,
        "PUT",
        "/api/loans/9999",
        Some(json!({ "memberId": 1, "bookId": 10 })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(read_body(response).await.is_empty());
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_loan_existing() {
    let (app, members) = setup_app();
    members.add_member(member(1));
    let loan_id = create_loan(&app, 1, 10).await;

    let response = send(&app, "DELETE", &format!("/api/loans/{}", loan_id), None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let result: CommandResult = serde_json::from_slice(&read_body(response).await).unwrap();
    assert!(result.success);
    assert_eq!(result.id, Some(loan_id));

    // The record is actually gone
    let response = send(&app, "GET", &format!("/api/loans/{}", loan_id), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_loan_missing_still_reports_success() {
    // Current contract behavior: delete never checks existence before
    // responding, so a miss is indistinguishable from a delete.
    let (app, _members) = setup_app();

    let response = send(&app, "DELETE", "/api/loans/9999", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let result: CommandResult = serde_json::from_slice(&read_body(response).await).unwrap();
    assert!(result.success);
    assert_eq!(result.id, Some(9999));
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let (app, _members) = setup_app();

    let response = send(&app, "GET", "/health", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_body(response).await, b"OK");
}
