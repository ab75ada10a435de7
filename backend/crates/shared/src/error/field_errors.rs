//! Field Errors - per-field validation messages
//!
//! Request bodies are validated field by field and every failure is
//! reported at once, keyed by the field name.

use std::collections::BTreeMap;

use serde::Serialize;

use super::app_error::{AppError, AppResult};

/// Key used for errors that do not belong to a single field
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Standard validation messages
pub mod messages {
    pub const REQUIRED: &str = "This field is required.";
    pub const BLANK: &str = "This field may not be blank.";
    pub const INVALID_EMAIL: &str = "Enter a valid email address.";

    pub fn max_length(max: usize) -> String {
        format!("Ensure this field has no more than {max} characters.")
    }
}

/// Ordered map of `field -> [message]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Shorthand for a single-field error set
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Keep the parsed value, or record the parser's message against `field`
    pub fn check<T>(&mut self, field: &str, result: AppResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.add(field, err.message());
                None
            }
        }
    }

    /// Parse a field that must be present
    pub fn required<T, F>(&mut self, field: &str, raw: Option<String>, parse: F) -> Option<T>
    where
        F: FnOnce(String) -> AppResult<T>,
    {
        match raw {
            Some(raw) => self.check(field, parse(raw)),
            None => {
                self.add(field, messages::REQUIRED);
                None
            }
        }
    }

    /// Parse a field that may be omitted (partial updates)
    pub fn optional<T, F>(&mut self, field: &str, raw: Option<String>, parse: F) -> Option<T>
    where
        F: FnOnce(String) -> AppResult<T>,
    {
        raw.and_then(|raw| self.check(field, parse(raw)))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }

    /// `Ok(())` when nothing was recorded, otherwise a 400 carrying the map
    pub fn into_result(self) -> AppResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation(self))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_per_field() {
        let mut errors = FieldErrors::new();
        errors.add("email", messages::REQUIRED);
        errors.add("name", messages::BLANK);
        errors.add("name", messages::max_length(255));

        assert_eq!(errors.get("email"), Some(&[messages::REQUIRED.to_string()][..]));
        assert_eq!(errors.get("name").map(|m| m.len()), Some(2));
        assert!(errors.get("password").is_none());
    }

    #[test]
    fn test_into_result() {
        assert!(FieldErrors::new().into_result().is_ok());

        let err = FieldErrors::single("name", messages::REQUIRED)
            .into_result()
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(err.field_errors().is_some());
    }

    #[test]
    fn test_required_and_optional() {
        let parse = |raw: String| {
            if raw.is_empty() {
                Err(AppError::bad_request(messages::BLANK))
            } else {
                Ok(raw)
            }
        };

        let mut errors = FieldErrors::new();
        assert_eq!(errors.required("a", Some("x".into()), parse), Some("x".to_string()));
        assert_eq!(errors.required("b", None, parse), None);
        assert_eq!(errors.required("c", Some(String::new()), parse), None);
        assert_eq!(errors.optional("d", None, parse), None);
        assert_eq!(errors.optional("e", Some("y".into()), parse), Some("y".to_string()));

        assert_eq!(errors.get("b").unwrap()[0], messages::REQUIRED);
        assert_eq!(errors.get("c").unwrap()[0], messages::BLANK);
        assert!(errors.get("a").is_none());
        assert!(errors.get("d").is_none());
    }

    #[test]
    fn test_serializes_as_map() {
        let errors = FieldErrors::single("name", messages::max_length(10));
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": ["Ensure this field has no more than 10 characters."]})
        );
    }
}
