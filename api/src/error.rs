//! HTTP error mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use formforge_core::{FieldErrors, FormError};

/// An error response: status code, user-visible message, and per-field
/// validation errors when the request failed validation.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub errors: Option<FieldErrors>,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            errors: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// 422 with the per-field errors, displayed beside their fields.
    pub fn validation(errors: FieldErrors) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: "Validation failed".to_string(),
            errors: Some(errors),
        }
    }
}

impl From<FormError> for ApiError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::FormNotFound(_) | FormError::SubmissionNotFound(_) => {
                Self::not_found(err.to_string())
            }
            FormError::FormNotLive => Self::forbidden("Form is not accepting submissions"),
            FormError::InvalidSecret => Self::bad_request("Invalid secret or project id"),
            FormError::Validation(errors) => Self::validation(errors),
            FormError::FieldLimitReached(_) => {
                Self::bad_request("You have reached the maximum number of fields")
            }
            FormError::ProjectLimitReached(_) => {
                Self::bad_request("You have reached the maximum number of projects")
            }
            other => Self::bad_request(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = serde_json::json!({
            "success": false,
            "message": self.message,
        });
        if let Some(errors) = &self.errors {
            body["errors"] = serde_json::to_value(errors).unwrap_or_default();
        }
        (self.status, Json(body)).into_response()
    }
}
