//! Error types for Formforge

use thiserror::Error;

use crate::schema::FieldErrors;

/// Formforge error type
#[derive(Error, Debug)]
pub enum FormError {
    /// Form not found
    #[error("form not found: {0}")]
    FormNotFound(String),

    /// Field not found within a form
    #[error("field not found: {0}")]
    FieldNotFound(String),

    /// Submission not found
    #[error("submission not found: {0}")]
    SubmissionNotFound(String),

    /// Form is not accepting submissions
    #[error("form is not live")]
    FormNotLive,

    /// Submission secret did not match the project secret
    #[error("invalid project secret")]
    InvalidSecret,

    /// Per-form field limit reached
    #[error("field limit reached ({0} fields max)")]
    FieldLimitReached(usize),

    /// Per-account project limit reached
    #[error("project limit reached ({0} projects max)")]
    ProjectLimitReached(usize),

    /// One or more field values violated the form schema
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(FieldErrors),

    /// A submission for this form instance is already in flight
    #[error("a submission is already in flight")]
    SubmissionInFlight,

    /// Reorder target out of bounds
    #[error("field index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// Storage error
    #[error("storage error: {0}")]
    Storage(String),
}

/// Result type for Formforge
pub type Result<T> = std::result::Result<T, FormError>;
