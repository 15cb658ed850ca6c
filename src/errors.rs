use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use askama::Template;
use std::fmt;

use crate::models::Field;

/// Errors raised by the HTML routes.
#[derive(Debug)]
pub enum AppError {
    Template(askama::Error),
    Csrf,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Template(e) => write!(f, "Template error: {e}"),
            AppError::Csrf => write!(f, "Invalid or missing CSRF token"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Csrf => HttpResponse::Forbidden().body("Invalid or missing CSRF token"),
            AppError::Template(_) => {
                log::error!("{self}");
                HttpResponse::InternalServerError().body("Internal Server Error")
            }
        }
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Template(e)
    }
}

/// Render an Askama template into a 200 HTML response.
pub fn render(tmpl: impl Template) -> Result<HttpResponse, AppError> {
    let body = tmpl.render()?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body))
}

/// A user-correctable problem with a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: Field,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Why the relay endpoint refused a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    Validation(ValidationError),
    Internal(String),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::Validation(_) => StatusCode::BAD_REQUEST,
            RelayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to the caller. Internal details stay in the log.
    pub fn public_message(&self) -> &str {
        match self {
            RelayError::Validation(v) => &v.message,
            RelayError::Internal(_) => "Internal server error",
        }
    }
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayError::Validation(e) => write!(f, "Validation error: {e}"),
            RelayError::Internal(e) => write!(f, "Internal error: {e}"),
        }
    }
}

impl From<ValidationError> for RelayError {
    fn from(e: ValidationError) -> Self {
        RelayError::Validation(e)
    }
}

/// A coupon call that did not yield a coupon code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownstreamError {
    Network(String),
    InvalidResponse(String),
    NoCoupon { status: u16, message: Option<String> },
}

impl fmt::Display for DownstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownstreamError::Network(e) => write!(f, "Coupon service unreachable: {e}"),
            DownstreamError::InvalidResponse(e) => write!(f, "Unreadable coupon response: {e}"),
            DownstreamError::NoCoupon { status, message } => write!(
                f,
                "Coupon issuance failed (status {status}): {}",
                message.as_deref().unwrap_or("No coupon code received")
            ),
        }
    }
}

/// A submission that could not get past the relay step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// The relay answered and refused the payload.
    Rejected(String),
    /// The relay could not be reached or its answer could not be read.
    Network(String),
}

impl SubmitError {
    /// Text shown to the user above the form.
    pub fn alert(&self) -> String {
        match self {
            SubmitError::Rejected(e) => format!("Submission failed: {e}"),
            SubmitError::Network(_) => "Network error occurred. Please try again.".to_string(),
        }
    }
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::Rejected(e) => write!(f, "Relay rejected submission: {e}"),
            SubmitError::Network(e) => write!(f, "Network error: {e}"),
        }
    }
}
