//! API error taxonomy.
//!
//! Reads surface these inline; writes surface them as toasts and, for
//! validation failures, as per-field annotations on the open form.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Common result type for backend calls
pub type ApiResult<T> = Result<T, ApiError>;

/// One validation message, optionally tied to a form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Wire name of the offending field (`nombre`, `email`, ...)
    pub field: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response
    #[error("network error: {0}")]
    Network(String),

    /// The backend rejected the body (FastAPI `{"detail": [...]}`)
    #[error("{}", first_message(.0))]
    Validation(Vec<FieldError>),

    /// Any other non-2xx response
    #[error("request failed ({status}): {message}")]
    Status { status: u16, message: String },

    /// A 2xx body that did not match the expected shape
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

fn first_message(errors: &[FieldError]) -> &str {
    errors.first().map(|e| e.message.as_str()).unwrap_or("validation failed")
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<Detail>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Detail {
    Text(String),
    Errors(Vec<WireValidationError>),
}

#[derive(Deserialize)]
struct WireValidationError {
    #[serde(default)]
    loc: Vec<Value>,
    msg: String,
}

impl WireValidationError {
    /// `["body", "nombre"]` names the `nombre` field; `["body"]` names nothing
    fn field(&self) -> Option<String> {
        self.loc
            .iter()
            .rev()
            .filter_map(Value::as_str)
            .find(|seg| !matches!(*seg, "body" | "query" | "path"))
            .map(str::to_string)
    }
}

impl ApiError {
    /// Classify a non-2xx response from its status and raw body
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<ErrorBody>(body).ok();
        match parsed {
            Some(ErrorBody { detail: Some(Detail::Errors(errors)), .. }) if !errors.is_empty() => {
                ApiError::Validation(
                    errors
                        .into_iter()
                        .map(|e| FieldError { field: e.field(), message: e.msg })
                        .collect(),
                )
            }
            Some(ErrorBody { detail: Some(Detail::Text(message)), .. })
            | Some(ErrorBody { message: Some(message), .. }) => {
                ApiError::Status { status, message }
            }
            _ => ApiError::Status {
                status,
                message: if body.trim().is_empty() {
                    format!("HTTP {status}")
                } else {
                    body.trim().to_string()
                },
            },
        }
    }

    /// Text for the error toast
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => {
                "Something went wrong. Check your connection and retry.".to_string()
            }
            ApiError::Validation(errors) => first_message(errors).to_string(),
            ApiError::Status { message, .. } => message.clone(),
            ApiError::Decode(_) => "The server sent an unexpected response.".to_string(),
        }
    }

    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ApiError::Validation(errors) => errors,
            _ => &[],
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_body() {
        let body = r#"{"detail":[{"loc":["body","nombre"],"msg":"field required",
            "type":"value_error.missing"}]}"#;
        let err = ApiError::from_response(422, body);
        assert_eq!(
            err.field_errors(),
            &[FieldError { field: Some("nombre".into()), message: "field required".into() }]
        );
        assert_eq!(err.user_message(), "field required");
        assert_eq!(err.to_string(), "field required");
    }

    #[test]
    fn test_validation_without_field() {
        let body = r#"{"detail":[{"loc":["body"],"msg":"invalid body","type":"x"}]}"#;
        let err = ApiError::from_response(422, body);
        assert_eq!(err.field_errors()[0].field, None);
    }

    #[test]
    fn test_message_bodies() {
        let err = ApiError::from_response(404, r#"{"detail":"Plan not found"}"#);
        assert!(err.is_not_found());
        assert_eq!(err.user_message(), "Plan not found");

        let err = ApiError::from_response(400, r#"{"message":"Bad things"}"#);
        assert_eq!(err.user_message(), "Bad things");

        let err = ApiError::from_response(502, "");
        assert_eq!(err.user_message(), "HTTP 502");

        let err = ApiError::from_response(500, "Internal Server Error");
        assert_eq!(err.user_message(), "Internal Server Error");
    }
}
