use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;
use crate::utils::{BaseResponse, ErrorResponse};

use super::dto::{
    ActivationRequest, CurrentUserResponse, LoginRequest, RegisterRequest, RegisterResponse,
    ResetPasswordConfirmRequest, ResetPasswordRequest, SuccessCurrentUserResponse,
    SuccessRegisterResponse, SuccessTokenResponse, TokenResponse,
};
use super::service::UserService;

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/v1/auth/users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account registered", body = SuccessRegisterResponse),
        (status = 400, description = "Validation failure", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<BaseResponse<RegisterResponse>>), AppError> {
    req.validate()?;

    let result = UserService::register(state, req).await?;

    Ok((StatusCode::CREATED, Json(BaseResponse::created(result))))
}

/// Activate an account
#[utoipa::path(
    post,
    path = "/api/v1/auth/users/activation",
    request_body = ActivationRequest,
    responses(
        (status = 200, description = "Account activated"),
        (status = 400, description = "Invalid activation link", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn activate(
    State(state): State<AppState>,
    Json(req): Json<ActivationRequest>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    req.validate()?;

    UserService::activate(state, req).await?;

    Ok(Json(BaseResponse::success(())))
}

/// Request a password reset link
///
/// Responds 200 whether or not the email has an account.
#[utoipa::path(
    post,
    path = "/api/v1/auth/users/reset_password",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Reset link dispatched if the account exists"),
        (status = 400, description = "Validation failure", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    req.validate()?;

    UserService::reset_password(state, req).await?;

    Ok(Json(BaseResponse::success(())))
}

/// Complete a password reset
#[utoipa::path(
    post,
    path = "/api/v1/auth/users/reset_password_confirm",
    request_body = ResetPasswordConfirmRequest,
    responses(
        (status = 200, description = "Password changed"),
        (status = 400, description = "Invalid reset link or weak password", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn reset_password_confirm(
    State(state): State<AppState>,
    Json(req): Json<ResetPasswordConfirmRequest>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    req.validate()?;

    UserService::reset_password_confirm(state, req).await?;

    Ok(Json(BaseResponse::success(())))
}

/// Email/password login
#[utoipa::path(
    post,
    path = "/api/v1/auth/token/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Access token issued", body = SuccessTokenResponse),
        (status = 401, description = "Invalid credentials or inactive account", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<BaseResponse<TokenResponse>>, AppError> {
    req.validate()?;

    let result = UserService::login(state, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// Current-user profile
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's profile", body = SuccessCurrentUserResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<BaseResponse<CurrentUserResponse>>, AppError> {
    let user_id = user.user_id()?;

    let result = UserService::me(state, user_id).await?;

    Ok(Json(BaseResponse::success(result)))
}
