use axum::{
    Router,
    routing::get,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, create_loan, delete_loan, get_loan_by_id, get_loan_with_member, list_loans,
    list_loans_by_member, update_loan,
};

/// Creates the API router with all loan endpoints.
///
/// Read operations:
/// - GET /api/loans - list all loans
/// - GET /api/loans/:id - get a loan by id
/// - GET /api/loans/anggota/:id - get a loan joined with member details
/// - GET /api/loans/by-anggota/:member_id - list a member's loans
///
/// Write operations:
/// - POST /api/loans - create a loan
/// - PUT /api/loans/:id - update a loan
/// - DELETE /api/loans/:id - delete a loan
///
/// The `anggota` path segments are part of the published contract and kept
/// verbatim.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        // Loan endpoints
        .route("/api/loans", get(list_loans).post(create_loan))
        .route(
            "/api/loans/:id",
            get(get_loan_by_id).put(update_loan).delete(delete_loan),
        )
        .route("/api/loans/anggota/:id", get(get_loan_with_member))
        .route("/api/loans/by-anggota/:member_id", get(list_loans_by_member))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
