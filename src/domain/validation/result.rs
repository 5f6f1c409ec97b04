use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

/// Raw request fields, name to value
pub type RawFields = HashMap<String, String>;

/// Field and form level validation messages, in the order they were found
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrors {
    pub field_errors: BTreeMap<String, Vec<String>>,
    pub form_errors: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_field(&mut self, field: &str, message: impl Into<String>) {
        self.field_errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn add_form(&mut self, message: impl Into<String>) {
        self.form_errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.field_errors.is_empty() && self.form_errors.is_empty()
    }

    /// Messages for one field, empty when the field passed
    pub fn field(&self, field: &str) -> &[String] {
        self.field_errors
            .get(field)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Form-level messages joined for display, or `fallback` when there are none
    pub fn summary(&self, fallback: &str) -> String {
        if self.form_errors.is_empty() {
            fallback.to_string()
        } else {
            self.form_errors.join(", ")
        }
    }
}

/// Outcome of validating raw fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult<T> {
    Valid(T),
    Invalid(ValidationErrors),
}

impl<T> ValidationResult<T> {
    /// Finish validation: `Valid(build())` when no errors were collected
    pub fn from_errors(errors: ValidationErrors, build: impl FnOnce() -> Option<T>) -> Self {
        if !errors.is_empty() {
            return Self::Invalid(errors);
        }

        match build() {
            Some(value) => Self::Valid(value),
            None => {
                let mut errors = errors;
                errors.add_form("Invalid request.");
                Self::Invalid(errors)
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    pub fn into_result(self) -> Result<T, ValidationErrors> {
        match self {
            Self::Valid(value) => Ok(value),
            Self::Invalid(errors) => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_keep_insertion_order_per_field() {
        let mut errors = ValidationErrors::new();
        errors.add_field("password", "first");
        errors.add_field("password", "second");

        assert_eq!(errors.field("password"), ["first", "second"]);
        assert!(errors.field("email").is_empty());
    }

    #[test]
    fn test_summary_fallback() {
        let mut errors = ValidationErrors::new();
        assert_eq!(errors.summary("Please correct the errors."), "Please correct the errors.");

        errors.add_form("a");
        errors.add_form("b");
        assert_eq!(errors.summary("unused"), "a, b");
    }

    #[test]
    fn test_serializes_camel_case() {
        let mut errors = ValidationErrors::new();
        errors.add_field("email", "bad");

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["fieldErrors"]["email"][0], "bad");
        assert!(json["formErrors"].as_array().unwrap().is_empty());
    }
}
