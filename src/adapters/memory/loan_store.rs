use crate::ports::loan_store::{LoanRecord, LoanStore as LoanStoreTrait, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

/// In-memory implementation of the loan store.
///
/// Backs the test suite and database-less local runs. A `BTreeMap` keeps
/// listings ordered by id, matching the SQL adapter.
pub struct LoanStore {
    loans: Mutex<BTreeMap<i64, LoanRecord>>,
    next_id: AtomicI64,
}

impl LoanStore {
    pub fn new() -> Self {
        Self {
            loans: Mutex::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for LoanStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LoanStoreTrait for LoanStore {
    async fn list_all(&self) -> Result<Vec<LoanRecord>> {
        let loans = self.loans.lock().unwrap();
        Ok(loans.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<LoanRecord>> {
        let loans = self.loans.lock().unwrap();
        Ok(loans.get(&id).cloned())
    }

    async fn find_by_member_id(&self, member_id: i64) -> Result<Vec<LoanRecord>> {
        let loans = self.loans.lock().unwrap();
        Ok(loans
            .values()
            .filter(|l| l.member_id == member_id)
            .cloned()
            .collect())
    }

    async fn insert(&self, record: LoanRecord) -> Result<LoanRecord> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = LoanRecord {
            id: Some(id),
            ..record
        };

        let mut loans = self.loans.lock().unwrap();
        loans.insert(id, record.clone());
        Ok(record)
    }

    async fn update(&self, id: i64, record: LoanRecord) -> Result<Option<LoanRecord>> {
        let mut loans = self.loans.lock().unwrap();
        if !loans.contains_key(&id) {
            return Ok(None);
        }

        let record = LoanRecord {
            id: Some(id),
            ..record
        };
        loans.insert(id, record.clone());
        Ok(Some(record))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut loans = self.loans.lock().unwrap();
        loans.remove(&id);
        Ok(())
    }
}
