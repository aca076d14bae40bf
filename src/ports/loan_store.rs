use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// A loan record linking a member to a borrowed book.
///
/// `id` is assigned by the store on insert; client-supplied ids are ignored.
/// A loan is considered active while `return_date` is unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LoanRecord {
    #[serde(default)]
    pub id: Option<i64>,
    pub member_id: i64,
    pub book_id: i64,
    #[serde(default)]
    pub loan_date: Option<NaiveDate>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub return_date: Option<NaiveDate>,
}

impl LoanRecord {
    /// Whether the book is still out.
    pub fn is_active(&self) -> bool {
        self.return_date.is_none()
    }
}

/// Storage port for loan records.
///
/// The application layer only knows this trait; the concrete backend
/// (PostgreSQL or in-memory) is wired in at startup.
#[async_trait]
pub trait LoanStore: Send + Sync {
    /// All loan records, ordered by id.
    async fn list_all(&self) -> Result<Vec<LoanRecord>>;

    /// A single loan by its id.
    async fn get_by_id(&self, id: i64) -> Result<Option<LoanRecord>>;

    /// All loans held by a member, ordered by id.
    async fn find_by_member_id(&self, member_id: i64) -> Result<Vec<LoanRecord>>;

    /// Insert a new record and return it with the assigned id.
    async fn insert(&self, record: LoanRecord) -> Result<LoanRecord>;

    /// Replace the record with the given id.
    ///
    /// Returns the stored record, or `None` when no row matched.
    async fn update(&self, id: i64, record: LoanRecord) -> Result<Option<LoanRecord>>;

    /// Remove the record with the given id. Deleting a missing id is not
    /// an error.
    async fn delete(&self, id: i64) -> Result<()>;
}
