//! Persisted record types and the form-binding helpers they share.

mod bid_list;
mod curve_point;
mod rating;
mod rule_name;
mod trade;
mod user;

pub use bid_list::BidList;
pub use curve_point::CurvePoint;
pub use rating::Rating;
pub use rule_name::RuleName;
pub use trade::Trade;
pub use user::{User, UserForm};

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, de};
use std::fmt::Display;
use std::str::FromStr;

/// Date-time formats accepted from HTML inputs.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Format used when a date-time is written back into a form field.
pub const DATETIME_DISPLAY_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Deserializes a form value, treating an empty input as unset.
///
/// # Errors
/// Returns an error if a non-empty value does not parse as `T`.
pub fn empty_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let opt = Option::<String>::deserialize(de)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => T::from_str(s).map_err(de::Error::custom).map(Some),
    }
}

/// Deserializes an HTML date-time input, treating an empty input as unset.
///
/// # Errors
/// Returns an error if a non-empty value matches none of the accepted formats.
pub fn optional_datetime<'de, D>(de: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(de)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_datetime(s)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid date-time: {}", s))),
    }
}

/// Parses a date-time in any of the accepted input formats.
#[must_use]
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// Renders an optional value for a form field (empty when unset).
#[must_use]
pub fn display_opt<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

/// Renders an optional date-time for a form field.
#[must_use]
pub fn display_datetime(value: &Option<NaiveDateTime>) -> String {
    value
        .map(|v| v.format(DATETIME_DISPLAY_FORMAT).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct SampleForm {
        #[serde(default, deserialize_with = "empty_as_none")]
        quantity: Option<f64>,
        #[serde(default, deserialize_with = "optional_datetime")]
        when: Option<NaiveDateTime>,
    }

    #[test]
    fn test_parse_datetime_formats() {
        assert!(parse_datetime("2024-03-29T16:00").is_some());
        assert!(parse_datetime("2024-03-29T16:00:30").is_some());
        assert!(parse_datetime("2024-03-29 16:00:30").is_some());
        assert!(parse_datetime("29/03/2024").is_none());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let value = parse_datetime("2024-03-29T16:00:30");
        assert_eq!(parse_datetime(&display_datetime(&value)), value);
        assert_eq!(display_datetime(&None), "");
    }

    #[test]
    fn test_display_opt() {
        assert_eq!(display_opt(&Some(5.2)), "5.2");
        assert_eq!(display_opt::<i32>(&None), "");
    }

    #[test]
    fn test_sample_form_deserializes_values() {
        let sample: SampleForm = serde_urlencoded::from_str("quantity=5.5&when=2024-01-02T03%3A04").unwrap();
        assert_eq!(sample.quantity, Some(5.5));
        assert!(sample.when.is_some());
    }

    #[test]
    fn test_sample_form_treats_empty_as_none() {
        let sample: SampleForm = serde_urlencoded::from_str("quantity=&when=").unwrap();
        assert_eq!(sample.quantity, None);
        assert_eq!(sample.when, None);
    }

    #[test]
    fn test_sample_form_missing_fields_default() {
        let sample: SampleForm = serde_urlencoded::from_str("").unwrap();
        assert_eq!(sample.quantity, None);
        assert_eq!(sample.when, None);
    }

    #[test]
    fn test_sample_form_rejects_malformed_number() {
        assert!(serde_urlencoded::from_str::<SampleForm>("quantity=abc").is_err());
    }
}
