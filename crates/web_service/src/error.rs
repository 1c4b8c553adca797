use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use list_store::ListStoreError;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum AppError {
    /// User input was rejected. `rejected` carries the form field and the
    /// submitted value so the form can be shown again with it.
    #[error("{message}")]
    Validation {
        message: String,
        rejected: Option<(&'static str, String)>,
    },

    #[error("{0}")]
    NotFound(String),

    /// The request body could not be read as the expected form
    #[error("{message}")]
    InvalidRequest { status: StatusCode, message: String },

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl AppError {
    /// Attach the rejected form input to a validation error.
    pub fn with_input(self, field: &'static str, input: &str) -> Self {
        match self {
            AppError::Validation { message, .. } => AppError::Validation {
                message,
                rejected: Some((field, input.to_string())),
            },
            other => other,
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::NotFound(_) => "not_found",
            AppError::InvalidRequest { .. } => "invalid_request",
            AppError::InternalError(_) => "api_error",
        }
    }
}

impl From<ListStoreError> for AppError {
    fn from(err: ListStoreError) -> Self {
        if err.is_validation() {
            AppError::Validation {
                message: err.to_string(),
                rejected: None,
            }
        } else {
            AppError::NotFound(err.to_string())
        }
    }
}

#[derive(Serialize)]
struct JsonError {
    message: String,
    r#type: String,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidRequest { status, .. } => *status,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let error = JsonError {
            message: self.to_string(),
            r#type: self.error_type().to_string(),
        };

        let mut body = Map::new();
        body.insert(
            "error".to_string(),
            serde_json::to_value(error).unwrap_or(Value::Null),
        );
        if let AppError::Validation {
            rejected: Some((field, input)),
            ..
        } = self
        {
            body.insert(field.to_string(), Value::String(input.clone()));
        }
        HttpResponse::build(status_code).json(Value::Object(body))
    }
}
