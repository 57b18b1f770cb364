//! Identifier and payload validation.
//!
//! Payload DTOs derive [`validator::Validate`]; the functions here are the
//! custom and schema-level rules those derives reference, plus the
//! conversion from [`ValidationErrors`] into [`CoreError::Validation`].

use std::borrow::Cow;

use validator::{Validate, ValidateEmail, ValidationError, ValidationErrors};

use crate::error::CoreError;
use crate::types::{EntityId, Timestamp};

/// Key under which `validator` files struct-level (schema) errors.
const SCHEMA_ERRORS_KEY: &str = "__all__";

/// Parse a textual identifier into an [`EntityId`].
///
/// `entity` only feeds the error message (e.g. `"trip"`).
pub fn parse_id(entity: &str, raw: &str) -> Result<EntityId, CoreError> {
    uuid::Uuid::parse_str(raw)
        .map_err(|_| CoreError::Validation(format!("invalid {entity} id '{raw}': expected a UUID")))
}

/// Run the derived validation rules of `payload`.
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), CoreError> {
    payload
        .validate()
        .map_err(|errors| CoreError::Validation(describe(&errors)))
}

/// Render validation errors as one deterministic, client-safe sentence.
///
/// Fields are listed alphabetically; schema-level errors have no prefix.
fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    let parts: Vec<String> = fields
        .into_iter()
        .map(|(field, errs)| {
            let reasons = errs
                .iter()
                .map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => e.code.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", ");
            if field == SCHEMA_ERRORS_KEY {
                reasons
            } else {
                format!("{field}: {reasons}")
            }
        })
        .collect();

    format!("invalid input: {}", parts.join("; "))
}

/// Reject empty or whitespace-only strings.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("must not be blank")));
    }
    Ok(())
}

/// Every entry must be a syntactically valid email address.
pub fn email_list(emails: &[String]) -> Result<(), ValidationError> {
    match emails.iter().find(|email| !email.validate_email()) {
        Some(bad) => Err(ValidationError::new("email").with_message(Cow::Owned(format!(
            "'{bad}' is not a valid email address"
        )))),
        None => Ok(()),
    }
}

/// A trip must end strictly after it starts.
pub fn date_range(starts_at: &Timestamp, ends_at: &Timestamp) -> Result<(), ValidationError> {
    if ends_at <= starts_at {
        return Err(ValidationError::new("date_range")
            .with_message(Cow::Borrowed("ends_at must be after starts_at")));
    }
    Ok(())
}
