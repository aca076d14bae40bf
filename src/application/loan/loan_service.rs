use crate::ports::{LoanRecord, LoanStore, Member, MemberDirectory};
use chrono::{Duration, Utc};
use std::sync::Arc;

use super::errors::{LoanServiceError, Result};

/// Standard loan period applied when a create request carries no due date.
const LOAN_PERIOD_DAYS: i64 = 14;

/// Service dependencies.
///
/// Defined as a plain data structure; behavior lives in free functions that
/// take the dependencies as an explicit argument. All collaborators are
/// injected, none are reached through globals.
#[derive(Clone)]
pub struct ServiceDependencies {
    pub loan_store: Arc<dyn LoanStore>,
    pub member_directory: Arc<dyn MemberDirectory>,
}

/// A loan joined with the member holding it.
///
/// Read-only composite produced by [`get_loan_with_member`]; passed through
/// to the API layer unchanged.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanDetail {
    pub loan: LoanRecord,
    pub member: Member,
}

/// List every loan record.
pub async fn list_loans(deps: &ServiceDependencies) -> Result<Vec<LoanRecord>> {
    deps.loan_store
        .list_all()
        .await
        .map_err(LoanServiceError::Store)
}

/// Fetch a single loan by id. `None` when no record matches.
pub async fn get_loan(deps: &ServiceDependencies, id: i64) -> Result<Option<LoanRecord>> {
    deps.loan_store
        .get_by_id(id)
        .await
        .map_err(LoanServiceError::Store)
}

/// Fetch a loan joined with its member.
///
/// Returns an empty list when the loan does not exist or the member can no
/// longer be resolved; otherwise a single joined element. Directory misses
/// are not an error here: the detail view is best-effort by contract.
pub async fn get_loan_with_member(deps: &ServiceDependencies, id: i64) -> Result<Vec<LoanDetail>> {
    let Some(loan) = deps
        .loan_store
        .get_by_id(id)
        .await
        .map_err(LoanServiceError::Store)?
    else {
        return Ok(Vec::new());
    };

    let member = deps
        .member_directory
        .get_member(loan.member_id)
        .await
        .map_err(LoanServiceError::Directory)?;

    Ok(member
        .map(|member| LoanDetail { loan, member })
        .into_iter()
        .collect())
}

/// List every loan held by a member. May be empty; the API layer decides
/// how to render an empty history.
pub async fn list_loans_by_member(
    deps: &ServiceDependencies,
    member_id: i64,
) -> Result<Vec<LoanRecord>> {
    deps.loan_store
        .find_by_member_id(member_id)
        .await
        .map_err(LoanServiceError::Store)
}

/// Create a new loan.
///
/// Business rules:
/// - member and book ids must be positive
/// - the member must exist in the member directory
/// - the member must not already hold an active loan of the same book
///
/// Missing dates are defaulted: `loan_date` to today, `due_date` to
/// `loan_date` plus the standard loan period. A client-supplied id or
/// return date is discarded; the store assigns the id.
pub async fn create_loan(deps: &ServiceDependencies, record: LoanRecord) -> Result<LoanRecord> {
    // 1. Basic shape validation
    if record.member_id <= 0 {
        return Err(LoanServiceError::InvalidLoanRequest(
            "memberId must be a positive id".to_string(),
        ));
    }
    if record.book_id <= 0 {
        return Err(LoanServiceError::InvalidLoanRequest(
            "bookId must be a positive id".to_string(),
        ));
    }

    // 2. The member must exist
    let member = deps
        .member_directory
        .get_member(record.member_id)
        .await
        .map_err(LoanServiceError::Directory)?;
    if member.is_none() {
        return Err(LoanServiceError::MemberNotFound(record.member_id));
    }

    // 3. No second active loan of the same book for the same member
    let existing = deps
        .loan_store
        .find_by_member_id(record.member_id)
        .await
        .map_err(LoanServiceError::Store)?;
    if existing
        .iter()
        .any(|l| l.book_id == record.book_id && l.is_active())
    {
        return Err(LoanServiceError::DuplicateActiveLoan);
    }

    // 4. Fill defaults and persist
    let loan_date = record.loan_date.unwrap_or_else(|| Utc::now().date_naive());
    let due_date = match record.due_date {
        Some(due) => due,
        // The wire format accepts dates near the end of chrono's range, so
        // the default must not overflow past NaiveDate::MAX
        None => loan_date
            .checked_add_signed(Duration::days(LOAN_PERIOD_DAYS))
            .ok_or_else(|| {
                LoanServiceError::InvalidLoanRequest(
                    "loanDate is too far in the future".to_string(),
                )
            })?,
    };

    let record = LoanRecord {
        id: None,
        loan_date: Some(loan_date),
        due_date: Some(due_date),
        return_date: None,
        ..record
    };

    deps.loan_store
        .insert(record)
        .await
        .map_err(LoanServiceError::Store)
}

/// Replace the loan with the given id.
///
/// Returns the stored record, or `None` when no record matched. The update
/// is a full replacement; no validation beyond existence is applied.
pub async fn update_loan(
    deps: &ServiceDependencies,
    id: i64,
    record: LoanRecord,
) -> Result<Option<LoanRecord>> {
    deps.loan_store
        .update(id, record)
        .await
        .map_err(LoanServiceError::Store)
}

/// Delete the loan with the given id.
///
/// Deleting an id that does not exist is not reported as a failure; the
/// operation only distinguishes store errors from completion.
pub async fn delete_loan(deps: &ServiceDependencies, id: i64) -> Result<()> {
    deps.loan_store
        .delete(id)
        .await
        .map_err(LoanServiceError::Store)
}
