//! Profile submission domain: raw input, field validation and the validated record.
//!
//! A [`ProfileRecord`] can only be produced by [`validate_submission`], so any record
//! handed to a store has already passed every field rule.

use serde::Deserialize;
use std::fmt;

pub mod email;
pub mod fields;
pub mod form;

pub use fields::{validate_age, validate_email, validate_full_name, validate_phone};
pub use form::{validate_submission, ValidationOutcome};

/// Untrusted form input, keyed by the wire field names.
///
/// Absent fields are `None` and are treated exactly like empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawSubmission {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub age: Option<String>,
}

impl RawSubmission {
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        age: impl Into<String>,
    ) -> Self {
        Self {
            full_name: Some(full_name.into()),
            email: Some(email.into()),
            phone: Some(phone.into()),
            age: Some(age.into()),
        }
    }
}

/// The four profile fields, in the order their errors are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FullName,
    Email,
    Phone,
    Age,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::FullName, Field::Email, Field::Phone, Field::Age];

    /// Form field name used on the wire.
    pub fn name(self) -> &'static str {
        match self {
            Field::FullName => "full_name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Age => "age",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which rule rejected a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    Required,
    Length,
    Format,
    Range,
}

/// A single field rejection carrying its fixed user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    field: Field,
    rule: FieldRule,
    message: &'static str,
}

impl FieldError {
    pub(crate) fn new(field: Field, rule: FieldRule, message: &'static str) -> Self {
        Self {
            field,
            rule,
            message,
        }
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn rule(&self) -> FieldRule {
        self.rule
    }

    pub fn message(&self) -> &'static str {
        self.message
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

impl std::error::Error for FieldError {}

/// Outcome of a single field validator.
pub type FieldResult<T> = Result<T, FieldError>;

/// A fully validated profile submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRecord {
    full_name: String,
    email: String,
    phone: String,
    age: i32,
}

impl ProfileRecord {
    // Only the form validator builds records.
    pub(crate) fn from_validated(full_name: String, email: String, phone: String, age: i32) -> Self {
        Self {
            full_name,
            email,
            phone,
            age,
        }
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn age(&self) -> i32 {
        self.age
    }
}
