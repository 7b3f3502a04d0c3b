//! Form binding that reports malformed values as field errors.
//!
//! Submitted values are checked against the [`InputKind`] of their field
//! before the record is deserialized. A value that does not parse is recorded
//! as a field error and bound as unset, so the form can be shown again with
//! the message next to the field.

use crate::api::views::{FormField, InputKind};
use crate::error::{AppError, AppResult};
use crate::models::parse_datetime;
use crate::validation::ValidationErrors;
use serde::de::DeserializeOwned;

/// Raw name/value pairs of a submitted form, in submission order.
pub type FormPairs = Vec<(String, String)>;

/// Binds a submitted form onto `T`.
///
/// Returns the bound record together with the type mismatches found. Only the
/// first value of a repeated parameter is kept. An `id` that is not an integer
/// is dropped.
///
/// # Errors
/// Returns an error if the checked values still fail to deserialize.
pub fn bind<T: DeserializeOwned>(
    fields: &[FormField],
    pairs: FormPairs,
) -> AppResult<(T, ValidationErrors)> {
    let mut errors = ValidationErrors::new();
    let mut accepted: FormPairs = Vec::with_capacity(pairs.len());

    for (name, value) in pairs {
        if accepted.iter().any(|(seen, _)| *seen == name) || errors.has_field(&name) {
            continue;
        }
        if name == "id" && !value.trim().is_empty() && value.trim().parse::<i32>().is_err() {
            continue;
        }
        if let Some(field) = fields.iter().find(|f| f.name == name)
            && let Some(message) = type_mismatch(field, &value)
        {
            errors.add(field.name, message);
            continue;
        }
        accepted.push((name, value));
    }

    let encoded = serde_urlencoded::to_string(&accepted)
        .map_err(|e| AppError::Internal(format!("form encoding failed: {}", e)))?;
    let entity = serde_urlencoded::from_str(&encoded)
        .map_err(|e| AppError::Internal(format!("form binding failed: {}", e)))?;
    Ok((entity, errors))
}

/// Message for a value that does not fit its input kind. Empty values are unset, not malformed.
fn type_mismatch(field: &FormField, value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let malformed = match field.input {
        InputKind::Number => !value.parse::<f64>().is_ok_and(f64::is_finite),
        InputKind::Integer => value.parse::<i32>().is_err(),
        InputKind::DateTime => parse_datetime(value).is_none(),
        InputKind::Text | InputKind::Password | InputKind::Select(_) => false,
    };
    if !malformed {
        return None;
    }
    Some(match field.input {
        InputKind::Integer => format!("{} must be a whole number", field.label),
        InputKind::DateTime => format!("{} must be a valid date and time", field.label),
        _ => format!("{} must be a number", field.label),
    })
}
