use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::user;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email(message = "invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, max = 150, message = "firstName is required"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 150, message = "lastName is required"))]
    pub last_name: String,

    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivationRequest {
    /// User id from the activation link
    #[validate(length(min = 1, message = "uid is required"))]
    pub uid: String,

    #[validate(length(min = 1, message = "token is required"))]
    pub token: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[validate(email(message = "invalid email address"))]
    pub email: String,
}

/// Confirmation payload from the emailed reset link.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordConfirmRequest {
    /// User id from the reset link
    #[validate(length(min = 1, message = "uid is required"))]
    pub uid: String,

    #[validate(length(min = 1, message = "token is required"))]
    pub token: String,

    #[validate(length(min = 8, message = "newPassword must be at least 8 characters"))]
    pub new_password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub auth_token: String,
}

/// Current-user profile. Password and permission flags are intentionally
/// absent.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub profile_picture: Option<String>,
}

impl From<user::Model> for CurrentUserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.user_id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            profile_picture: model.profile_picture,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessRegisterResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: RegisterResponse,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessTokenResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: TokenResponse,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessCurrentUserResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: CurrentUserResponse,
}
