//! HTTP-facing error type.
//!
//! Every error leaves the service in JSON:API shape:
//!
//! ```json
//! { "errors": [ { "status": 503, "detail": "Service unavailable, please try again." } ] }
//! ```
//!
//! Validation failures additionally carry a top-level `status` and one entry
//! per offending field with `source` and a list of messages.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use validator::ValidationErrors;

use crate::application::services::LookupError;

pub const NOT_FOUND_DETAIL: &str = "The specified resource does not exist.";
pub const UNAVAILABLE_DETAIL: &str = "Service unavailable, please try again.";

/// Messages for one request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub source: String,
    pub detail: Vec<String>,
}

#[derive(Serialize)]
struct ErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
    errors: Vec<ErrorObject>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum ErrorObject {
    Field {
        status: u16,
        source: String,
        detail: Vec<String>,
    },
    General {
        status: u16,
        detail: String,
    },
}

#[derive(Debug)]
pub enum AppError {
    Validation { errors: Vec<FieldError> },
    NotFound,
    ServiceUnavailable { reason: String },
    /// The body could not be read as the expected JSON document.
    Rejected { status: StatusCode, detail: String },
}

impl AppError {
    /// A single-field validation failure.
    pub fn invalid_field(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            errors: vec![FieldError {
                source: source.into(),
                detail: vec![message.into()],
            }],
        }
    }

    pub fn service_unavailable(reason: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            reason: reason.into(),
        }
    }

    /// A validation failure over several fields, ordered by field name.
    pub fn validation(mut errors: Vec<FieldError>) -> Self {
        errors.sort_by(|a, b| a.source.cmp(&b.source));
        Self::Validation { errors }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Rejected { status, .. } => *status,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = status.as_u16();

        let body = match self {
            AppError::Validation { errors } => ErrorBody {
                status: Some(code),
                errors: errors
                    .into_iter()
                    .map(|e| ErrorObject::Field {
                        status: code,
                        source: e.source,
                        detail: e.detail,
                    })
                    .collect(),
            },
            AppError::NotFound => general(code, NOT_FOUND_DETAIL),
            AppError::ServiceUnavailable { reason } => {
                tracing::warn!(%reason, "Responding 503");
                general(code, UNAVAILABLE_DETAIL)
            }
            AppError::Rejected { detail, .. } => {
                tracing::debug!(%detail, "Rejected request body");
                general(code, detail)
            }
        };

        (status, Json(body)).into_response()
    }
}

fn general(status: u16, detail: impl Into<String>) -> ErrorBody {
    ErrorBody {
        status: None,
        errors: vec![ErrorObject::General {
            status,
            detail: detail.into(),
        }],
    }
}

/// Flattens derive-validator output into one entry per field.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| FieldError {
            source: field.to_string(),
            detail: errs
                .iter()
                .map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("The {} field is invalid.", field),
                })
                .collect(),
        })
        .collect()
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::validation(field_errors(&errors))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<LookupError> for AppError {
    fn from(e: LookupError) -> Self {
        AppError::service_unavailable(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::UnavailableCause;
    use serde_json::{Value, json};

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_shape() {
        let (status, body) =
            render(AppError::invalid_field("house", "The house does not exist.")).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body,
            json!({
                "status": 422,
                "errors": [
                    { "status": 422, "source": "house", "detail": ["The house does not exist."] }
                ]
            })
        );
    }

    #[tokio::test]
    async fn test_lookup_error_becomes_503() {
        let err: AppError =
            LookupError::ServiceUnavailable(UnavailableCause::ServerError(500)).into();

        let (status, body) = render(err).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            body,
            json!({ "errors": [ { "status": 503, "detail": UNAVAILABLE_DETAIL } ] })
        );
    }

    #[tokio::test]
    async fn test_not_found_shape() {
        let (status, body) = render(AppError::NotFound).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({ "errors": [ { "status": 404, "detail": NOT_FOUND_DETAIL } ] })
        );
    }

    #[tokio::test]
    async fn test_rejected_body_keeps_status() {
        let err = AppError::Rejected {
            status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
            detail: "Expected request with `Content-Type: application/json`".to_string(),
        };

        let (status, body) = render(err).await;

        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body["errors"][0]["status"], 415);
        assert!(body.get("status").is_none());
    }

    #[test]
    fn test_validation_sorts_fields() {
        let err = AppError::validation(vec![
            FieldError {
                source: "school".to_string(),
                detail: vec!["a".to_string()],
            },
            FieldError {
                source: "house".to_string(),
                detail: vec!["b".to_string()],
            },
        ]);

        match err {
            AppError::Validation { errors } => {
                assert_eq!(errors[0].source, "house");
                assert_eq!(errors[1].source, "school");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
