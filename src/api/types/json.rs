//! JSON extractors that report rejections in the API error format

use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json as AxumJson,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::error::ApiError;
use crate::domain::validation::{validate, RawFields, RequestSchema};

/// `axum::Json` whose rejections are returned as [`ApiError`] bodies
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match AxumJson::<T>::from_request(req, state).await {
            Ok(AxumJson(value)) => Ok(Json(value)),
            Err(rejection) => Err(ApiError::new(rejection.status(), "Invalid request body.")
                .with_error(format_rejection_message(&rejection))
                .with_code("json_parse_error")),
        }
    }
}

fn format_rejection_message(rejection: &axum::extract::rejection::JsonRejection) -> String {
    use axum::extract::rejection::JsonRejection::*;

    match rejection {
        JsonDataError(err) => format!("Invalid JSON data: {}", err.body_text()),
        JsonSyntaxError(err) => format!("Invalid JSON syntax: {}", err.body_text()),
        MissingJsonContentType(_) => {
            "Missing Content-Type header. Expected 'application/json'.".to_string()
        }
        BytesRejection(err) => format!("Failed to read request body: {}", err.body_text()),
        _ => "Invalid JSON request".to_string(),
    }
}

impl<T> IntoResponse for Json<T>
where
    T: serde::Serialize,
{
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}

/// Flat JSON object read as raw form fields for validation. Strings are
/// kept as-is, numbers and booleans are stringified, `null` is dropped.
#[derive(Debug, Clone, Default)]
pub struct FormFields(pub RawFields);

impl FormFields {
    pub fn into_inner(self) -> RawFields {
        self.0
    }

    /// Validate into a typed request, or a 400 carrying every field error
    pub fn validate<T: RequestSchema>(&self, fallback: &str) -> Result<T, ApiError> {
        validate::<T>(&self.0)
            .into_result()
            .map_err(|errors| ApiError::validation(errors, fallback))
    }
}

impl<S> FromRequest<S> for FormFields
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(object) = Json::<Map<String, Value>>::from_request(req, state).await?;

        let mut fields = RawFields::new();
        for (name, value) in object {
            let value = match value {
                Value::Null => continue,
                Value::String(s) => s,
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(ApiError::new(StatusCode::BAD_REQUEST, "Invalid request body.")
                        .with_error(format!("Field '{}' must be a string.", name))
                        .with_code("invalid_field_type"));
                }
            };
            fields.insert(name, value);
        }

        Ok(FormFields(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::header;

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_form_fields_from_object() {
        let FormFields(fields) = FormFields::from_request(
            json_request(r#"{"email": "a@b.com", "remember": true, "age": 3, "skip": null}"#),
            &(),
        )
        .await
        .unwrap();

        assert_eq!(fields.get("email").map(String::as_str), Some("a@b.com"));
        assert_eq!(fields.get("remember").map(String::as_str), Some("true"));
        assert_eq!(fields.get("age").map(String::as_str), Some("3"));
        assert!(!fields.contains_key("skip"));
    }

    #[tokio::test]
    async fn test_form_fields_rejects_nested_values() {
        let err = FormFields::from_request(json_request(r#"{"email": ["a@b.com"]}"#), &())
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.response.code.as_deref(), Some("invalid_field_type"));
    }

    #[tokio::test]
    async fn test_syntax_error_is_json_error() {
        let err = FormFields::from_request(json_request("{not json"), &())
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.response.code.as_deref(), Some("json_parse_error"));
    }

    #[test]
    fn test_json_into_inner() {
        assert_eq!(Json(42).into_inner(), 42);
    }
}
