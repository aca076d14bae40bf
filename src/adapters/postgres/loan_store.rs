use crate::ports::loan_store::{LoanRecord, LoanStore as LoanStoreTrait, Result};
use async_trait::async_trait;
use sqlx::PgPool;

/// PostgreSQL implementation of the loan store.
///
/// Expects a `loans` table:
///
/// ```sql
/// CREATE TABLE loans (
///     id          BIGSERIAL PRIMARY KEY,
///     member_id   BIGINT NOT NULL,
///     book_id     BIGINT NOT NULL,
///     loan_date   DATE,
///     due_date    DATE,
///     return_date DATE
/// );
/// ```
pub struct LoanStore {
    pool: PgPool,
}

impl LoanStore {
    /// Create a new loan store from a PostgreSQL connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LoanStoreTrait for LoanStore {
    async fn list_all(&self) -> Result<Vec<LoanRecord>> {
        let rows = sqlx::query_as::<_, LoanRecord>(
            r#"
            SELECT id, member_id, book_id, loan_date, due_date, return_date
            FROM loans
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<LoanRecord>> {
        let row = sqlx::query_as::<_, LoanRecord>(
            r#"
            SELECT id, member_id, book_id, loan_date, due_date, return_date
            FROM loans
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_by_member_id(&self, member_id: i64) -> Result<Vec<LoanRecord>> {
        let rows = sqlx::query_as::<_, LoanRecord>(
            r#"
            SELECT id, member_id, book_id, loan_date, due_date, return_date
            FROM loans
            WHERE member_id = $1
            ORDER BY id
            "#,
        )
        .bind(member_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Insert the record and return it with the database-assigned id.
    async fn insert(&self, record: LoanRecord) -> Result<LoanRecord> {
        let row = sqlx::query_as::<_, LoanRecord>(
            r#"
            INSERT INTO loans (member_id, book_id, loan_date, due_date, return_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, member_id, book_id, loan_date, due_date, return_date
            "#,
        )
        .bind(record.member_id)
        .bind(record.book_id)
        .bind(record.loan_date)
        .bind(record.due_date)
        .bind(record.return_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Full-row replacement keyed by id; `None` when no row matched.
    async fn update(&self, id: i64, record: LoanRecord) -> Result<Option<LoanRecord>> {
        let row = sqlx::query_as::<_, LoanRecord>(
            r#"
            UPDATE loans
            SET member_id = $2,
                book_id = $3,
                loan_date = $4,
                due_date = $5,
                return_date = $6
            WHERE id = $1
            RETURNING id, member_id, book_id, loan_date, due_date, return_date
            "#,
        )
        .bind(id)
        .bind(record.member_id)
        .bind(record.book_id)
        .bind(record.loan_date)
        .bind(record.due_date)
        .bind(record.return_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM loans WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
