pub mod loan_store;
pub mod member_directory;

pub use loan_store::*;
pub use member_directory::*;
