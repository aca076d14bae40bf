pub mod errors;
pub mod loan_service;

pub use errors::{LoanServiceError, Result};
pub use loan_service::{
    LoanDetail, ServiceDependencies, create_loan, delete_loan, get_loan, get_loan_with_member,
    list_loans, list_loans_by_member, update_loan,
};
