pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::intake_service::{IntakeOutcome, IntakeService};
pub use app::submission::{SubmissionHandler, SubmissionResult};
pub use domain::profile::{validate_submission, ProfileRecord, RawSubmission, ValidationOutcome};
pub use infra::config::{Config, StoreBackend};
pub use storage::{InMemoryProfileStore, PostgresProfileStore, ProfileStore, StoreError, StoredProfile};
