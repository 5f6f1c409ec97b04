//! Field-level validation rules

use validator::ValidateEmail;

use super::result::{RawFields, ValidationErrors};

pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address.";

const MIN_PASSWORD_LENGTH: usize = 8;

/// Reads fields out of a raw map while collecting errors
pub struct FieldReader<'a> {
    fields: &'a RawFields,
    errors: ValidationErrors,
}

impl<'a> FieldReader<'a> {
    pub fn new(fields: &'a RawFields) -> Self {
        Self {
            fields,
            errors: ValidationErrors::new(),
        }
    }

    /// Value of a required field. Records "This field is required." when absent.
    pub fn required(&mut self, name: &str) -> Option<&'a str> {
        match self.fields.get(name) {
            Some(value) => Some(value.as_str()),
            None => {
                self.errors.add_field(name, REQUIRED_MESSAGE);
                None
            }
        }
    }

    /// Value of an optional field. Absent and blank values are both `None`.
    pub fn optional(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .filter(|value| !value.trim().is_empty())
            .cloned()
    }

    pub fn errors_mut(&mut self) -> &mut ValidationErrors {
        &mut self.errors
    }

    pub fn finish(self) -> ValidationErrors {
        self.errors
    }
}

/// Record an error unless `value` is a syntactically valid email address
/// whose domain has a top-level label (`a@b` is rejected)
pub fn check_email(errors: &mut ValidationErrors, field: &str, value: &str) -> bool {
    if value.validate_email() && has_top_level_domain(value) {
        true
    } else {
        errors.add_field(field, INVALID_EMAIL_MESSAGE);
        false
    }
}

fn has_top_level_domain(email: &str) -> bool {
    let Some((_, domain)) = email.rsplit_once('@') else {
        return false;
    };

    match domain.rsplit_once('.') {
        Some((rest, tld)) => {
            !rest.is_empty()
                && !rest.split('.').any(str::is_empty)
                && tld.len() >= 2
                && tld.chars().all(|c| c.is_ascii_alphabetic())
        }
        None => false,
    }
}

/// Record `message` when `value` is empty
pub fn check_non_empty(
    errors: &mut ValidationErrors,
    field: &str,
    value: &str,
    message: &str,
) -> bool {
    if value.is_empty() {
        errors.add_field(field, message);
        false
    } else {
        true
    }
}

/// Check every password rule, recording one message per unmet rule in a
/// fixed order
pub fn check_password_strength(errors: &mut ValidationErrors, field: &str, password: &str) -> bool {
    let rules: [(bool, &str); 5] = [
        (
            password.chars().count() >= MIN_PASSWORD_LENGTH,
            "Password must be at least 8 characters long.",
        ),
        (
            password.chars().any(|c| c.is_ascii_lowercase()),
            "Password must contain at least one lowercase letter.",
        ),
        (
            password.chars().any(|c| c.is_ascii_uppercase()),
            "Password must contain at least one uppercase letter.",
        ),
        (
            password.chars().any(|c| c.is_ascii_digit()),
            "Password must contain at least one number.",
        ),
        (
            password.chars().any(|c| !c.is_ascii_alphanumeric()),
            "Password must contain at least one special character.",
        ),
    ];

    let mut valid = true;
    for (passed, message) in rules {
        if !passed {
            errors.add_field(field, message);
            valid = false;
        }
    }

    valid
}
