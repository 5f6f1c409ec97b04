//! Request validation
//!
//! Raw request fields are validated into typed requests before any external
//! system is called. Failures are collected per field so every problem can be
//! shown at once.

mod result;
mod rules;
mod schemas;

pub use result::{RawFields, ValidationErrors, ValidationResult};
pub use rules::{check_email, check_non_empty, check_password_strength, FieldReader};
pub use schemas::{DeleteProfileRequest, SessionRequest, SignInRequest, SignupRequest};

/// A typed request that can be built from raw fields
pub trait RequestSchema: Sized {
    fn validate(fields: &RawFields) -> ValidationResult<Self>;
}

/// Validate raw fields against a request schema
pub fn validate<T: RequestSchema>(fields: &RawFields) -> ValidationResult<T> {
    T::validate(fields)
}
