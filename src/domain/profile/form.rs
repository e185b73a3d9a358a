//! Whole-form validation.

use super::fields::{validate_age, validate_email, validate_full_name, validate_phone};
use super::{FieldError, ProfileRecord, RawSubmission};

/// Result of validating one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// One error per rejected field, ordered full name, email, phone, age. Never empty.
    Errors(Vec<FieldError>),
    Record(ProfileRecord),
}

impl ValidationOutcome {
    /// User-facing messages, empty for a valid record.
    pub fn messages(&self) -> Vec<&'static str> {
        match self {
            ValidationOutcome::Errors(errors) => errors.iter().map(FieldError::message).collect(),
            ValidationOutcome::Record(_) => Vec::new(),
        }
    }

    pub fn into_record(self) -> Option<ProfileRecord> {
        match self {
            ValidationOutcome::Record(record) => Some(record),
            ValidationOutcome::Errors(_) => None,
        }
    }
}

fn field_text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

/// Runs every field validator and collects all failures.
pub fn validate_submission(raw: &RawSubmission) -> ValidationOutcome {
    let full_name = validate_full_name(field_text(&raw.full_name));
    let email = validate_email(field_text(&raw.email));
    let phone = validate_phone(field_text(&raw.phone));
    let age = validate_age(field_text(&raw.age));

    match (full_name, email, phone, age) {
        (Ok(full_name), Ok(email), Ok(phone), Ok(age)) => {
            ValidationOutcome::Record(ProfileRecord::from_validated(full_name, email, phone, age))
        }
        (full_name, email, phone, age) => {
            let errors = [full_name.err(), email.err(), phone.err(), age.err()]
                .into_iter()
                .flatten()
                .collect();
            ValidationOutcome::Errors(errors)
        }
    }
}
