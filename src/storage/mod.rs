//! Record store abstraction for validated profiles.
//!
//! The intake pipeline only sees [`ProfileStore`]; the concrete backend is chosen at
//! startup and injected.

use crate::domain::profile::ProfileRecord;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

pub mod memory;
pub mod postgres;

pub use memory::InMemoryProfileStore;
pub use postgres::PostgresProfileStore;

/// A profile row as persisted by a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredProfile {
    pub id: i64,
    pub record: ProfileRecord,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to obtain a database connection")]
    Connection(#[source] sqlx::Error),
    #[error("failed to prepare profile statement")]
    Prepare(#[source] sqlx::Error),
    #[error("failed to execute profile statement")]
    Execute(#[source] sqlx::Error),
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Classifies a query error by where it failed.
    pub fn from_query(err: sqlx::Error) -> Self {
        if is_connection_error(&err) {
            StoreError::Connection(err)
        } else if is_prepare_error(&err) {
            StoreError::Prepare(err)
        } else {
            StoreError::Execute(err)
        }
    }
}

fn is_connection_error(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_)
            | sqlx::Error::WorkerCrashed
    )
}

// SQLSTATE classes 42 (syntax / undefined object) and 26 (invalid statement name) are
// raised while the statement is being prepared.
fn is_prepare_error(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db
            .code()
            .is_some_and(|code| code.starts_with("42") || code.starts_with("26")),
        _ => false,
    }
}

/// Persistence for validated profiles.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Writes one row and returns it with its assigned identifier.
    async fn insert(&self, record: &ProfileRecord) -> Result<StoredProfile, StoreError>;

    /// Cheap liveness probe used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Short backend name for logs.
    fn backend(&self) -> &'static str;
}
