use crate::application::loan::{
    self, LoanDetail, LoanServiceError, ServiceDependencies,
};
use crate::ports::LoanRecord;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::{error::ApiError, types::CommandResult};

// ============================================================================
// State
// ============================================================================

/// Application state shared between handlers.
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

/// Emit the structured failure event and convert to an API error.
///
/// Every handler reports a service failure the same way: one `request failed`
/// event tagged with the action, status and error message.
fn request_failed(action: &'static str, err: LoanServiceError) -> ApiError {
    tracing::error!(action, status = "FAILED", error = %err, "request failed");
    ApiError::from(err)
}

// ============================================================================
// Read handlers (GET)
// ============================================================================

/// GET /api/loans - list every loan record.
pub async fn list_loans(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LoanRecord>>, ApiError> {
    tracing::info!(action = "GET_ALL", "request received");

    let result = loan::list_loans(&state.service_deps)
        .await
        .map_err(|e| request_failed("GET_ALL", e))?;

    tracing::info!(
        action = "GET_ALL",
        status = "SUCCESS",
        count = result.len(),
        "request completed"
    );
    Ok(Json(result))
}

/// GET /api/loans/:id - fetch a loan by id.
///
/// Returns the record when found, otherwise a 404 with an empty body.
pub async fn get_loan_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<LoanRecord>, ApiError> {
    tracing::info!(action = "GET_BY_ID", id, "request received");

    match loan::get_loan(&state.service_deps, id)
        .await
        .map_err(|e| request_failed("GET_BY_ID", e))?
    {
        Some(record) => {
            tracing::info!(action = "GET_BY_ID", status = "SUCCESS", id, "request completed");
            Ok(Json(record))
        }
        None => {
            tracing::warn!(action = "GET_BY_ID", status = "NOT_FOUND", id, "request completed");
            Err(ApiError::NotFound)
        }
    }
}

/// GET /api/loans/anggota/:id - fetch a loan joined with its member.
///
/// Always responds 200; the list is empty when the loan or member is
/// missing.
pub async fn get_loan_with_member(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<LoanDetail>>, ApiError> {
    tracing::info!(action = "GET_WITH_DETAILS", id, "request received");

    let result = loan::get_loan_with_member(&state.service_deps, id)
        .await
        .map_err(|e| request_failed("GET_WITH_DETAILS", e))?;

    tracing::info!(
        action = "GET_WITH_DETAILS",
        status = "SUCCESS",
        count = result.len(),
        "request completed"
    );
    Ok(Json(result))
}

/// GET /api/loans/by-anggota/:member_id - list a member's loans.
///
/// An empty loan history is rendered as a 404 with an empty body.
pub async fn list_loans_by_member(
    State(state): State<Arc<AppState>>,
    Path(member_id): Path<i64>,
) -> Result<Json<Vec<LoanRecord>>, ApiError> {
    tracing::info!(action = "GET_BY_MEMBER_ID", member_id, "request received");

    let result = loan::list_loans_by_member(&state.service_deps, member_id)
        .await
        .map_err(|e| request_failed("GET_BY_MEMBER_ID", e))?;

    if result.is_empty() {
        tracing::warn!(
            action = "GET_BY_MEMBER_ID",
            status = "NOT_FOUND",
            member_id,
            "request completed"
        );
        return Err(ApiError::NotFound);
    }

    tracing::info!(
        action = "GET_BY_MEMBER_ID",
        status = "SUCCESS",
        count = result.len(),
        "request completed"
    );
    Ok(Json(result))
}

// ============================================================================
// Write handlers (POST/PUT/DELETE)
// ============================================================================

/// POST /api/loans - create a new loan.
///
/// Enforced business rules (application layer):
/// - member and book ids must be positive
/// - the member must exist
/// - no duplicate active loan of the same book for the same member
///
/// Any service error is reported as a 400 with the message embedded in the
/// command result rather than propagated.
pub async fn create_loan(
    State(state): State<Arc<AppState>>,
    Json(record): Json<LoanRecord>,
) -> (StatusCode, Json<CommandResult>) {
    tracing::info!(
        action = "CREATE",
        member_id = record.member_id,
        book_id = record.book_id,
        "request received"
    );

    match loan::create_loan(&state.service_deps, record).await {
        Ok(created) => {
            tracing::info!(
                action = "CREATE",
                status = "SUCCESS",
                id = created.id,
                "request completed"
            );
            (
                StatusCode::CREATED,
                Json(CommandResult::ok(created.id, "loan created successfully")),
            )
        }
        Err(e) => {
            tracing::error!(action = "CREATE", status = "FAILED", error = %e, "request failed");
            (
                StatusCode::BAD_REQUEST,
                Json(CommandResult::failed(e.to_string())),
            )
        }
    }
}

/// PUT /api/loans/:id - replace an existing loan.
///
/// Responds 404 with an empty body when the service reports no matching
/// record.
pub async fn update_loan(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(record): Json<LoanRecord>,
) -> Result<Json<CommandResult>, ApiError> {
    tracing::info!(action = "UPDATE", id, "request received");

    match loan::update_loan(&state.service_deps, id, record)
        .await
        .map_err(|e| request_failed("UPDATE", e))?
    {
        Some(_) => {
            tracing::info!(action = "UPDATE", status = "SUCCESS", id, "request completed");
            Ok(Json(CommandResult::ok(Some(id), "loan updated successfully")))
        }
        None => {
            tracing::warn!(action = "UPDATE", status = "NOT_FOUND", id, "request completed");
            Err(ApiError::NotFound)
        }
    }
}

/// DELETE /api/loans/:id - delete a loan.
///
/// Reports success whenever the store completes, without checking that the
/// record existed first. Known incompleteness carried over from the
/// published contract; callers cannot distinguish a delete from a no-op.
pub async fn delete_loan(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<CommandResult>, ApiError> {
    tracing::info!(action = "DELETE", id, "request received");

    loan::delete_loan(&state.service_deps, id)
        .await
        .map_err(|e| request_failed("DELETE", e))?;

    tracing::info!(action = "DELETE", status = "SUCCESS", id, "request completed");
    Ok(Json(CommandResult::ok(Some(id), "loan deleted successfully")))
}
