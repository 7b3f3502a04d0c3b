//! Field validation for submitted forms.
//!
//! Every rule of an entity is evaluated; violations are collected into a
//! [`ValidationErrors`] list instead of stopping at the first one.

use std::cmp::Ordering;

/// Message attached to a password that fails the strength policy.
pub const PASSWORD_POLICY_MESSAGE: &str = "Password must contain at least 8 characters, one uppercase letter, one digit and one special character.";

/// Minimum password length accepted by the strength policy.
const PASSWORD_MIN_LENGTH: usize = 8;

/// A single violated rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Form field name.
    pub field: &'static str,
    /// Human-readable message.
    pub message: String,
}

/// All violations found on one submitted record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Creates an empty error list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Returns true when no rule was violated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Messages attached to the given field, in the order they were recorded.
    pub fn messages_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.errors
            .iter()
            .filter(move |e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Iterates over all violations.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Checks that a string is present and not only whitespace.
    pub fn not_blank(&mut self, field: &'static str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.add(field, message);
        }
    }

    /// Checks that an optional value is set.
    pub fn required<T>(&mut self, field: &'static str, value: &Option<T>, message: &str) {
        if value.is_none() {
            self.add(field, message);
        }
    }

    /// Checks that a numeric value, when set, is zero or greater.
    ///
    /// Values that do not compare at all (NaN) fail the rule.
    pub fn positive_or_zero<T>(&mut self, field: &'static str, value: &Option<T>, message: &str)
    where
        T: PartialOrd + Default,
    {
        if let Some(v) = value
            && v.partial_cmp(&T::default()).is_none_or(Ordering::is_lt)
        {
            self.add(field, message);
        }
    }

    /// Checks that a string fits in a column of `max` characters.
    pub fn max_length(&mut self, field: &'static str, value: &str, max: usize, label: &str) {
        if value.chars().count() > max {
            self.add(field, format!("{} must be at most {} characters", label, max));
        }
    }

    /// Same as [`ValidationErrors::max_length`] for an optional value.
    pub fn max_length_opt(&mut self, field: &'static str, value: &Option<String>, max: usize, label: &str) {
        if let Some(v) = value {
            self.max_length(field, v, max, label);
        }
    }

    /// Returns true when a violation was recorded for the field.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Appends every violation of `other`.
    pub fn merge(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    /// Converts into a `Result`, failing when any violation was recorded.
    ///
    /// # Errors
    /// Returns `self` when at least one rule was violated.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Server-side validation contract evaluated before any create or update.
pub trait Validate {
    /// Evaluates all rules and returns every violation.
    ///
    /// # Errors
    /// Returns the collected violations when at least one rule fails.
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Checks the password strength policy.
#[must_use]
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= PASSWORD_MIN_LENGTH
        && password.chars().any(|c| c.is_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| !c.is_alphanumeric() && !c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_every_violation() {
        let mut errors = ValidationErrors::new();
        errors.not_blank("account", "", "Account is mandatory.");
        errors.not_blank("type", "   ", "Type is mandatory.");
        errors.positive_or_zero("bid", &Some(-1.0), "bid should be a positive.");
        assert_eq!(errors.len(), 3);
        assert_eq!(
            errors.messages_for("type").collect::<Vec<_>>(),
            vec!["Type is mandatory."]
        );
    }

    #[test]
    fn test_positive_or_zero_accepts_unset_and_zero() {
        let mut errors = ValidationErrors::new();
        errors.positive_or_zero::<f64>("bid", &None, "bid should be a positive.");
        errors.positive_or_zero("ask", &Some(0.0), "ask should be a positive.");
        errors.positive_or_zero("order", &Some(0_i32), "Order number must be positive.");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_positive_or_zero_rejects_nan() {
        let mut errors = ValidationErrors::new();
        errors.positive_or_zero("bidQuantity", &Some(f64::NAN), "bidQuantity should be positive.");
        errors.positive_or_zero("ask", &Some(f64::INFINITY), "ask should be a positive.");
        errors.positive_or_zero("bid", &Some(f64::NEG_INFINITY), "bid should be a positive.");
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["bidQuantity", "bid"]);
    }

    #[test]
    fn test_max_length_counts_characters() {
        let mut errors = ValidationErrors::new();
        errors.max_length("account", &"a".repeat(30), 30, "Account");
        errors.max_length("type", "ééééé", 5, "Type");
        assert!(errors.is_empty());

        errors.max_length("account", &"a".repeat(31), 30, "Account");
        errors.max_length_opt("status", &Some("ACTIVE_OPEN".to_string()), 10, "Status");
        errors.max_length_opt("book", &None, 10, "Book");
        assert_eq!(
            errors.messages_for("account").collect::<Vec<_>>(),
            vec!["Account must be at most 30 characters"]
        );
        assert!(errors.has_field("status"));
        assert!(!errors.has_field("book"));
    }

    #[test]
    fn test_merge_keeps_order() {
        let mut first = ValidationErrors::new();
        first.add("term", "Term must be a number");
        let mut second = ValidationErrors::new();
        second.add("term", "Term is mandatory");
        first.merge(second);
        assert_eq!(
            first.messages_for("term").collect::<Vec<_>>(),
            vec!["Term must be a number", "Term is mandatory"]
        );
    }

    #[test]
    fn test_required() {
        let mut errors = ValidationErrors::new();
        errors.required::<i32>("moodysRating", &None, "Moodys rating is mandatory");
        errors.required("fitchRating", &Some(3), "Fitch rating is mandatory");
        assert_eq!(errors.len(), 1);
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn test_into_result_ok_when_empty() {
        assert!(ValidationErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_password_policy() {
        assert!(is_strong_password("TestTest2*"));
        assert!(is_strong_password("Mamamiaaa12!!!!!"));
        assert!(!is_strong_password("123456789"));
        assert!(!is_strong_password("Short1!"));
        assert!(!is_strong_password("nouppercase1!"));
        assert!(!is_strong_password("NoDigitHere!"));
        assert!(!is_strong_password("NoSpecial123"));
    }
}
