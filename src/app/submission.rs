//! Persists validated profiles and maps store outcomes to renderable results.

use crate::domain::profile::ProfileRecord;
use crate::storage::{ProfileStore, StoredProfile};
use std::sync::Arc;

/// Message shown to the user whenever the store fails. The cause is only logged.
pub const STORE_FAILURE_MESSAGE: &str =
    "Произошла ошибка при сохранении данных. Пожалуйста, попробуйте позже или обратитесь к администратору.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    Stored(StoredProfile),
    Failed { message: &'static str },
}

/// Writes one validated record per call, without retry.
#[derive(Clone)]
pub struct SubmissionHandler {
    store: Arc<dyn ProfileStore>,
}

impl SubmissionHandler {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    pub async fn submit(&self, record: &ProfileRecord) -> SubmissionResult {
        match self.store.insert(record).await {
            Ok(stored) => {
                tracing::info!(
                    profile_id = stored.id,
                    backend = self.store.backend(),
                    "profile stored"
                );
                SubmissionResult::Stored(stored)
            }
            Err(err) => {
                tracing::error!(
                    error = %err,
                    cause = ?std::error::Error::source(&err),
                    backend = self.store.backend(),
                    "failed to store profile"
                );
                SubmissionResult::Failed {
                    message: STORE_FAILURE_MESSAGE,
                }
            }
        }
    }
}
