use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use super::response::ErrorResponse;

/// Application-wide error type.
///
/// Every variant carries a caller-facing message; the variant decides the
/// HTTP status and the envelope error code.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Unauthorized(String),
    Forbidden(String),
    InternalError(String),
    ValidationError(String),
    JsonParseFailed(String),

    // Event catalog
    EventNotFound(String),
    /// Caller is authenticated but is not the event creator.
    /// Existence is not hidden: this is a 403, not a 404.
    EventAccessDenied(String),

    // Identity
    EmailTaken(String),
    InvalidCredentials(String),
    AccountInactive(String),
    ActivationInvalid(String),
    PasswordResetInvalid(String),
}

impl AppError {
    pub fn message(&self) -> String {
        match self {
            AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::InternalError(msg)
            | AppError::ValidationError(msg)
            | AppError::EventNotFound(msg)
            | AppError::EventAccessDenied(msg)
            | AppError::EmailTaken(msg)
            | AppError::InvalidCredentials(msg)
            | AppError::AccountInactive(msg)
            | AppError::ActivationInvalid(msg)
            | AppError::PasswordResetInvalid(msg) => msg.clone(),
            AppError::JsonParseFailed(msg) => format!("Malformed request body: {}", msg),
        }
    }

    pub fn error_code(&self) -> String {
        match self {
            AppError::BadRequest(_) => "COMMON400",
            AppError::NotFound(_) => "COMMON404",
            AppError::Unauthorized(_) => "AUTH4001",
            AppError::Forbidden(_) => "COMMON403",
            AppError::InternalError(_) => "COMMON500",
            AppError::ValidationError(_) => "COMMON400",
            AppError::JsonParseFailed(_) => "COMMON400",
            AppError::EventNotFound(_) => "EVENT4041",
            AppError::EventAccessDenied(_) => "EVENT4031",
            AppError::EmailTaken(_) => "USER4091",
            AppError::InvalidCredentials(_) => "AUTH4011",
            AppError::AccountInactive(_) => "AUTH4012",
            AppError::ActivationInvalid(_) => "USER4001",
            AppError::PasswordResetInvalid(_) => "USER4002",
        }
        .to_string()
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::JsonParseFailed(_) => StatusCode::BAD_REQUEST,
            AppError::EventNotFound(_) => StatusCode::NOT_FOUND,
            AppError::EventAccessDenied(_) => StatusCode::FORBIDDEN,
            AppError::EmailTaken(_) => StatusCode::CONFLICT,
            AppError::InvalidCredentials(_) => StatusCode::UNAUTHORIZED,
            AppError::AccountInactive(_) => StatusCode::UNAUTHORIZED,
            AppError::ActivationInvalid(_) => StatusCode::BAD_REQUEST,
            AppError::PasswordResetInvalid(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.message();

        match &self {
            AppError::InternalError(_) => {
                error!("Internal Server Error: {}", message);
            }
            _ => {
                error!("Error [{}]: {}", error_code, message);
            }
        }

        let error_response = ErrorResponse::new(error_code, message);

        (status, Json(error_response)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::JsonParseFailed(rejection.to_string())
    }
}

/// Flattens validator output into one per-field message list,
/// e.g. `quantity: must be at least 1; email: invalid email address`.
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut parts: Vec<String> = errors
            .field_errors()
            .iter()
            .map(|(field, errs)| {
                let messages: Vec<String> = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                format!("{}: {}", field, messages.join(", "))
            })
            .collect();
        parts.sort();
        AppError::ValidationError(parts.join("; "))
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        AppError::Unauthorized(msg.into())
    }

    pub fn internal_error(msg: impl Into<String>) -> Self {
        AppError::InternalError(msg.into())
    }

    pub fn validation_error(msg: impl Into<String>) -> Self {
        AppError::ValidationError(msg.into())
    }
}
