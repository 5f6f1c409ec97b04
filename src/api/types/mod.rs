//! API request and response types

pub mod error;
pub mod json;
pub mod response;

pub use error::{ApiError, ApiErrorResponse, VALIDATION_FAILED};
pub use json::{FormFields, Json};
pub use response::{ActionResponse, LoginResponse, MeResponse};
