//! In-process profile store.
//!
//! Used for local runs without PostgreSQL and by the test suite. Identifiers start at 1 and
//! increase by one per successful insert.

use crate::domain::profile::ProfileRecord;
use crate::storage::{ProfileStore, StoreError, StoredProfile};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

#[derive(Default)]
pub struct InMemoryProfileStore {
    rows: Mutex<Vec<StoredProfile>>,
    unavailable: AtomicBool,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with [`StoreError::Unavailable`] until reset.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn rows(&self) -> Vec<StoredProfile> {
        self.rows.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.rows.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.lock().await.is_empty()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "in-memory store is switched off".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn insert(&self, record: &ProfileRecord) -> Result<StoredProfile, StoreError> {
        self.check_available()?;

        // Id assignment and push happen under one lock, so ids stay unique and ordered.
        let mut rows = self.rows.lock().await;
        let id = rows.last().map_or(1, |row| row.id + 1);
        let stored = StoredProfile {
            id,
            record: record.clone(),
            created_at: Utc::now(),
        };
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_available()
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
