//! Persistent profile store using PostgreSQL.

use crate::domain::profile::ProfileRecord;
use crate::storage::{ProfileStore, StoreError, StoredProfile};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

pub const PROFILE_TABLE: &str = "user_profiles";

const CREATE_PROFILE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS user_profiles (
    id BIGSERIAL PRIMARY KEY,
    full_name TEXT NOT NULL,
    email TEXT NOT NULL,
    phone TEXT NOT NULL,
    age INTEGER NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
)";

const INSERT_PROFILE_SQL: &str = "INSERT INTO user_profiles (full_name, email, phone, age)
     VALUES ($1, $2, $3, $4)
     RETURNING id, created_at";

/// A profile store backed by a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PostgresProfileStore {
    pool: PgPool,
}

impl PostgresProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects a pool to `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(StoreError::Connection)?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the profile table when it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_PROFILE_TABLE_SQL)
            .execute(&self.pool)
            .await
            .map_err(StoreError::from_query)?;
        Ok(())
    }

    /// Returns true when the profile table is present in the current schema.
    pub async fn table_exists(&self) -> Result<bool, StoreError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM information_schema.tables
                WHERE table_schema = current_schema() AND table_name = $1
            )",
        )
        .bind(PROFILE_TABLE)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::from_query)
    }
}

#[async_trait]
impl ProfileStore for PostgresProfileStore {
    async fn insert(&self, record: &ProfileRecord) -> Result<StoredProfile, StoreError> {
        // The connection goes back to the pool when `conn` drops, on every path.
        let mut conn = self.pool.acquire().await.map_err(StoreError::Connection)?;

        let row = sqlx::query(INSERT_PROFILE_SQL)
            .bind(record.full_name())
            .bind(record.email())
            .bind(record.phone())
            .bind(record.age())
            .fetch_one(&mut *conn)
            .await
            .map_err(StoreError::from_query)?;

        let id: i64 = row.try_get("id").map_err(StoreError::Execute)?;
        let created_at: DateTime<Utc> = row.try_get("created_at").map_err(StoreError::Execute)?;

        Ok(StoredProfile {
            id,
            record: record.clone(),
            created_at,
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(StoreError::from_query)?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
