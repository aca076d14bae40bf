use thiserror::Error;

/// Loan application layer errors.
#[derive(Debug, Error)]
pub enum LoanServiceError {
    /// The submitted record fails basic validation (missing/non-positive ids).
    #[error("{0}")]
    InvalidLoanRequest(String),

    /// The referenced member does not exist in the member directory.
    #[error("member {0} not found")]
    MemberNotFound(i64),

    /// The member already has this book out and not yet returned.
    #[error("duplicate active loan")]
    DuplicateActiveLoan,

    /// Loan store failure.
    #[error("loan store error: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Member directory failure.
    #[error("member directory error: {0}")]
    Directory(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Application layer Result type.
pub type Result<T> = std::result::Result<T, LoanServiceError>;
