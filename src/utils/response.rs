use serde::Serialize;
use utoipa::ToSchema;

/// Standard success envelope.
///
/// Shape:
/// ```json
/// {
///   "isSuccess": true,
///   "code": "COMMON200",
///   "message": "OK",
///   "result": { ... }
/// }
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseResponse<T: Serialize> {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: Option<T>,
}

impl<T: Serialize> BaseResponse<T> {
    pub fn success(result: T) -> Self {
        Self {
            is_success: true,
            code: "COMMON200".to_string(),
            message: "OK".to_string(),
            result: Some(result),
        }
    }

    /// Envelope for resources created with 201.
    pub fn created(result: T) -> Self {
        Self {
            is_success: true,
            code: "COMMON201".to_string(),
            message: "Created".to_string(),
            result: Some(result),
        }
    }
}

/// Error envelope, mirrors the success shape with `isSuccess: false`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: Option<()>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            is_success: false,
            code: code.into(),
            message: message.into(),
            result: None,
        }
    }
}
