//! Account request schemas

use super::result::{RawFields, ValidationResult};
use super::rules::{check_email, check_non_empty, check_password_strength, FieldReader};
use super::RequestSchema;

/// Validated signup form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
}

impl RequestSchema for SignupRequest {
    fn validate(fields: &RawFields) -> ValidationResult<Self> {
        let mut reader = FieldReader::new(fields);
        let email = reader.required("email");
        let password = reader.required("password");
        let confirm = reader.required("confirmPassword");

        let errors = reader.errors_mut();
        if let Some(email) = email {
            check_email(errors, "email", email);
        }
        if let Some(password) = password {
            check_password_strength(errors, "password", password);
        }
        // Checked even when other rules fail
        if let (Some(password), Some(confirm)) = (password, confirm) {
            if password != confirm {
                errors.add_field("confirmPassword", "Passwords do not match.");
            }
        }

        ValidationResult::from_errors(reader.finish(), || {
            Some(Self {
                email: email?.to_string(),
                password: password?.to_string(),
            })
        })
    }
}

/// Validated delete-profile form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteProfileRequest {
    pub email: String,
}

impl RequestSchema for DeleteProfileRequest {
    fn validate(fields: &RawFields) -> ValidationResult<Self> {
        let mut reader = FieldReader::new(fields);
        let email = reader.required("email");

        if let Some(email) = email {
            check_email(reader.errors_mut(), "email", email);
        }

        ValidationResult::from_errors(reader.finish(), || {
            Some(Self {
                email: email?.to_string(),
            })
        })
    }
}

/// Validated password sign-in form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

impl RequestSchema for SignInRequest {
    fn validate(fields: &RawFields) -> ValidationResult<Self> {
        let mut reader = FieldReader::new(fields);
        let email = reader.required("email");
        let password = reader.required("password");

        let errors = reader.errors_mut();
        if let Some(email) = email {
            check_email(errors, "email", email);
        }
        if let Some(password) = password {
            check_non_empty(errors, "password", password, "Password is required.");
        }

        ValidationResult::from_errors(reader.finish(), || {
            Some(Self {
                email: email?.to_string(),
                password: password?.to_string(),
            })
        })
    }
}

/// Id token presented to open a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRequest {
    pub id_token: String,
}

impl RequestSchema for SessionRequest {
    fn validate(fields: &RawFields) -> ValidationResult<Self> {
        let mut reader = FieldReader::new(fields);
        let id_token = reader.required("idToken");

        if let Some(id_token) = id_token {
            check_non_empty(reader.errors_mut(), "idToken", id_token, "ID token is required.");
        }

        ValidationResult::from_errors(reader.finish(), || {
            Some(Self {
                id_token: id_token?.to_string(),
            })
        })
    }
}
