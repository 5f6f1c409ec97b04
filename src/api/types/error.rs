//! API error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::conversion::{is_transient_overload, user_facing_ai_error};
use crate::domain::validation::ValidationErrors;
use crate::domain::DomainError;

pub const VALIDATION_FAILED: &str = "Validation failed.";

/// Error body: `{message, error?, code?, fieldErrors?, formErrors?}`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(flatten)]
    pub validation: Option<ValidationErrors>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                message: message.into(),
                error: None,
                code: None,
                validation: None,
            },
        }
    }

    /// Attach a detail message shown under the headline
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.response.error = Some(error.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.response.code = Some(code.into());
        self
    }

    /// 400 with per-field messages. `fallback` is shown when there are no
    /// form-level errors.
    pub fn validation(errors: ValidationErrors, fallback: &str) -> Self {
        let summary = errors.summary(fallback);
        let mut error = Self::new(StatusCode::BAD_REQUEST, VALIDATION_FAILED).with_error(summary);
        error.response.validation = Some(errors);
        error
    }

    /// Failed conversion: 503 when the model is overloaded, 502 otherwise
    pub fn conversion(headline: &str, error: &DomainError) -> Self {
        let detail = user_facing_ai_error(error);
        let status = match error {
            DomainError::Configuration { .. } => StatusCode::SERVICE_UNAVAILABLE,
            DomainError::Provider { message, .. } if is_transient_overload(message) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            _ => StatusCode::BAD_GATEWAY,
        };

        Self::new(status, headline).with_error(detail)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.response.error {
            Some(error) => write!(f, "{} {}: {}", self.status, self.response.message, error),
            None => write!(f, "{} {}", self.status, self.response.message),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validation_body() {
        let mut errors = ValidationErrors::new();
        errors.add_field("email", "Please enter a valid email address.");

        let err = ApiError::validation(errors, "Please correct the highlighted fields.");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let body = serde_json::to_value(&err.response).unwrap();
        assert_eq!(
            body,
            json!({
                "message": "Validation failed.",
                "error": "Please correct the highlighted fields.",
                "fieldErrors": { "email": ["Please enter a valid email address."] },
                "formErrors": []
            })
        );
    }

    #[test]
    fn test_plain_error_omits_optional_fields() {
        let err = ApiError::unauthorized("Not signed in.");
        let body = serde_json::to_value(&err.response).unwrap();

        assert_eq!(body, json!({ "message": "Not signed in." }));
    }

    #[test]
    fn test_conversion_overload_is_503() {
        let domain = DomainError::provider("gemini", "HTTP 503 Service Unavailable: busy");
        let err = ApiError::conversion("Error converting to Gherkin.", &domain);

        assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.response.message, "Error converting to Gherkin.");
        assert_eq!(
            err.response.error.as_deref(),
            Some("The AI model is temporarily overloaded. Please try again in a few moments.")
        );
    }

    #[test]
    fn test_conversion_other_error_is_502() {
        let domain = DomainError::provider("gemini", "HTTP 400 Bad Request: bad schema");
        let err = ApiError::conversion("Error generating test script.", &domain);

        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
        assert_eq!(
            err.response.error.as_deref(),
            Some("HTTP 400 Bad Request: bad schema")
        );
    }

    #[test]
    fn test_missing_ai_configuration_is_503() {
        let domain = DomainError::configuration("AI provider is not configured");
        let err = ApiError::conversion("Error converting to Gherkin.", &domain);

        assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
