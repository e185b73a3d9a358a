//! The profile intake pipeline.
//!
//! One call handles one submission end to end:
//! 1.  Validate every field of the raw form.
//! 2.  Stop with the collected messages if anything failed (nothing is written).
//! 3.  Otherwise write the record through the injected [`ProfileStore`].

use crate::app::submission::{SubmissionHandler, SubmissionResult};
use crate::domain::profile::{validate_submission, RawSubmission, ValidationOutcome};
use crate::storage::{ProfileStore, StoredProfile};
use std::sync::Arc;

/// Terminal state of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeOutcome {
    Invalid(Vec<&'static str>),
    Stored(StoredProfile),
    StoreFailed { message: &'static str },
}

impl IntakeOutcome {
    pub fn kind(&self) -> &'static str {
        match self {
            IntakeOutcome::Invalid(_) => "invalid",
            IntakeOutcome::Stored(_) => "stored",
            IntakeOutcome::StoreFailed { .. } => "store_failed",
        }
    }
}

#[derive(Clone)]
pub struct IntakeService {
    store: Arc<dyn ProfileStore>,
    handler: SubmissionHandler,
}

impl IntakeService {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        let handler = SubmissionHandler::new(store.clone());
        Self { store, handler }
    }

    pub fn store(&self) -> &Arc<dyn ProfileStore> {
        &self.store
    }

    pub async fn process(&self, raw: &RawSubmission) -> IntakeOutcome {
        let outcome = match validate_submission(raw) {
            ValidationOutcome::Errors(errors) => {
                tracing::debug!(
                    fields = ?errors.iter().map(|e| e.field().name()).collect::<Vec<_>>(),
                    "profile rejected"
                );
                IntakeOutcome::Invalid(errors.iter().map(|e| e.message()).collect())
            }
            ValidationOutcome::Record(record) => match self.handler.submit(&record).await {
                SubmissionResult::Stored(stored) => IntakeOutcome::Stored(stored),
                SubmissionResult::Failed { message } => IntakeOutcome::StoreFailed { message },
            },
        };
        tracing::info!(outcome = outcome.kind(), "profile submission handled");
        outcome
    }
}
