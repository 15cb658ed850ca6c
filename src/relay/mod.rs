pub mod forward;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::best_effort::{self, SideEffect};
use crate::errors::{RelayError, ValidationError};
use crate::form::validate::{is_valid_email, is_valid_mobile, is_valid_pin_code};
use crate::models::{Field, FormData, UserEntry};
use crate::store::SubmissionStore;

pub use forward::GoogleFormForwarder;

/// Body returned by the relay endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RelayResponse {
    pub fn ok() -> Self {
        Self { success: true, error: None }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self { success: false, error: Some(error.into()) }
    }
}

/// What happened to an accepted submission.
#[derive(Debug, Clone)]
pub struct RelayReceipt {
    pub entry: UserEntry,
    pub stored_count: usize,
    pub persisted: SideEffect,
    pub forwarded: SideEffect,
}

/// Server side of the relay: validate, record, forward.
pub struct RelayService {
    store: Arc<SubmissionStore>,
    forwarder: Option<GoogleFormForwarder>,
}

impl RelayService {
    pub fn new(store: Arc<SubmissionStore>, forwarder: Option<GoogleFormForwarder>) -> Self {
        Self { store, forwarder }
    }

    pub fn store(&self) -> &SubmissionStore {
        &self.store
    }

    /// Accept a submission. Only validation can fail it; the snapshot write and
    /// the Google Form forward are best-effort and reported in the receipt.
    pub async fn accept(&self, payload: FormData) -> Result<RelayReceipt, RelayError> {
        validate_payload(&payload)?;

        let entry = UserEntry::new(payload);
        let (stored_count, persisted) = self.store.append(entry.clone()).await;

        let forwarded = match &self.forwarder {
            Some(forwarder) => forwarder.forward(&entry).await,
            None => best_effort::skipped(
                "Google Form forward",
                "form id or required entry ids not configured",
            ),
        };

        log::info!("Accepted submission {} ({} stored)", entry.id, stored_count);
        Ok(RelayReceipt {
            entry,
            stored_count,
            persisted,
            forwarded,
        })
    }
}

pub const MISSING_REQUIRED: &str = "Missing required fields";
pub const INVALID_MOBILE: &str = "Invalid mobile number format";
pub const INVALID_EMAIL: &str = "Invalid email format";
pub const INVALID_PIN_CODE: &str = "Invalid PIN code format";
pub const INVALID_REFERRED_BY: &str = "Invalid referred by mobile number format";

/// Server-side checks, run even though the form already validated.
pub fn validate_payload(payload: &FormData) -> Result<(), ValidationError> {
    if payload.name.trim().is_empty() {
        return Err(ValidationError::new(Field::Name, MISSING_REQUIRED));
    }
    if payload.mobile.is_empty() {
        return Err(ValidationError::new(Field::Mobile, MISSING_REQUIRED));
    }
    if !is_valid_mobile(&payload.mobile) {
        return Err(ValidationError::new(Field::Mobile, INVALID_MOBILE));
    }
    if !payload.email.trim().is_empty() && !is_valid_email(&payload.email) {
        return Err(ValidationError::new(Field::Email, INVALID_EMAIL));
    }
    if !payload.pin_code.trim().is_empty() && !is_valid_pin_code(&payload.pin_code) {
        return Err(ValidationError::new(Field::PinCode, INVALID_PIN_CODE));
    }
    if !payload.referred_by.trim().is_empty() && !is_valid_mobile(&payload.referred_by) {
        return Err(ValidationError::new(Field::ReferredBy, INVALID_REFERRED_BY));
    }
    Ok(())
}

/// Explain a JSON body that parsed but does not have the shape of a submission:
/// a non-object body, or a field holding an object or a nested list.
pub fn malformed_payload(body: &Value) -> ValidationError {
    let Some(fields) = body.as_object() else {
        return ValidationError::new(Field::Name, MISSING_REQUIRED);
    };
    let bad = Field::ALL
        .into_iter()
        .find(|field| fields.get(field.as_str()).is_some_and(|v| !has_wire_shape(*field, v)));
    match bad {
        Some(Field::Name) | None => ValidationError::new(Field::Name, MISSING_REQUIRED),
        Some(Field::Mobile) => ValidationError::new(Field::Mobile, INVALID_MOBILE),
        Some(Field::Email) => ValidationError::new(Field::Email, INVALID_EMAIL),
        Some(Field::PinCode) => ValidationError::new(Field::PinCode, INVALID_PIN_CODE),
        Some(Field::ReferredBy) => ValidationError::new(Field::ReferredBy, INVALID_REFERRED_BY),
        Some(field) => ValidationError::new(field, format!("Invalid {field} value")),
    }
}

fn has_wire_shape(field: Field, value: &Value) -> bool {
    let scalar = |v: &Value| !v.is_array() && !v.is_object();
    match (field, value) {
        (Field::Interests, Value::Array(items)) => items.iter().all(scalar),
        _ => scalar(value),
    }
}
