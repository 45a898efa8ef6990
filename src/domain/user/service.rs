use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, Set};
use tracing::{info, warn};

use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::jwt::encode_token;

use super::dto::{
    ActivationRequest, CurrentUserResponse, LoginRequest, RegisterRequest, RegisterResponse,
    ResetPasswordConfirmRequest, ResetPasswordRequest, TokenResponse,
};
use super::entity::{activation_token, password_reset_token, user};

pub struct UserService;

impl UserService {
    /// Register a new account. The account starts inactive; an activation
    /// link is mailed out (best-effort).
    pub async fn register(
        state: AppState,
        req: RegisterRequest,
    ) -> Result<RegisterResponse, AppError> {
        // 1. Email is the login identifier, so it must be unique
        let existing = user::Entity::find()
            .filter(user::Column::Email.eq(req.email.clone()))
            .one(&state.db)
            .await?;

        if existing.is_some() {
            return Err(AppError::EmailTaken(
                "An account with this email already exists.".to_string(),
            ));
        }

        // 2. Store only the bcrypt hash
        let password_hash = bcrypt::hash(&req.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::InternalError(format!("Password hashing failed: {}", e)))?;

        let now = Utc::now().naive_utc();
        let model = user::ActiveModel {
            email: Set(req.email),
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            profile_picture: Set(None),
            password: Set(password_hash),
            is_active: Set(false),
            is_staff: Set(false),
            is_superuser: Set(false),
            date_joined: Set(now),
            last_login: Set(None),
            ..Default::default()
        };

        let inserted = model.insert(&state.db).await.map_err(|e| {
            // Unique index race on email maps to the same conflict
            let msg = e.to_string().to_lowercase();
            if msg.contains("duplicate") || msg.contains("unique") || msg.contains("constraint") {
                AppError::EmailTaken("An account with this email already exists.".to_string())
            } else {
                AppError::InternalError(e.to_string())
            }
        })?;

        // 3. Activation token for the emailed link
        let token_value = uuid::Uuid::new_v4().to_string();
        let token = activation_token::ActiveModel {
            user_id: Set(inserted.user_id),
            token: Set(token_value.clone()),
            created_at: Set(now),
            ..Default::default()
        };
        token.insert(&state.db).await?;

        info!(user_id = inserted.user_id, "User registered (inactive)");

        // 4. Activation mail, never fatal
        let link = format!(
            "{}/activate-account/{}/{}",
            state.config.frontend_base_url.trim_end_matches('/'),
            inserted.user_id,
            token_value
        );
        let body = format!(
            "Hi {},\n\nWelcome to EventBook! Activate your account here:\n{}\n\n\
             If you did not sign up, you can ignore this message.",
            inserted.first_name, link
        );

        if let Err(e) = state
            .mailer
            .send(&inserted.email, "Activate your EventBook account", &body)
            .await
        {
            warn!(
                user_id = inserted.user_id,
                error = %e.message(),
                "Activation mail failed; account stays registered"
            );
        }

        Ok(RegisterResponse {
            id: inserted.user_id,
            email: inserted.email,
            first_name: inserted.first_name,
            last_name: inserted.last_name,
        })
    }

    /// Activate an account with the uid/token pair from the emailed link.
    pub async fn activate(state: AppState, req: ActivationRequest) -> Result<(), AppError> {
        let user_id: i64 = req.uid.parse().map_err(|_| {
            AppError::ActivationInvalid("Invalid activation link.".to_string())
        })?;

        let token = activation_token::Entity::find()
            .filter(activation_token::Column::UserId.eq(user_id))
            .filter(activation_token::Column::Token.eq(req.token))
            .one(&state.db)
            .await?
            .ok_or_else(|| {
                AppError::ActivationInvalid("Invalid activation link.".to_string())
            })?;

        let model = user::Entity::find_by_id(user_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| {
                AppError::ActivationInvalid("Invalid activation link.".to_string())
            })?;

        let email = model.email.clone();
        let first_name = model.first_name.clone();

        let mut active: user::ActiveModel = model.into();
        active.is_active = Set(true);
        active.update(&state.db).await?;

        // Tokens are single-use
        token.delete(&state.db).await?;

        info!(user_id = user_id, "Account activated");

        let body = format!(
            "Hi {},\n\nYour EventBook account is now active. Happy booking!",
            first_name
        );
        if let Err(e) = state
            .mailer
            .send(&email, "Your EventBook account is active", &body)
            .await
        {
            warn!(user_id = user_id, error = %e.message(), "Confirmation mail failed");
        }

        Ok(())
    }

    /// Start a password reset. The response never discloses whether the
    /// email has an account; unknown addresses are logged and dropped.
    pub async fn reset_password(
        state: AppState,
        req: ResetPasswordRequest,
    ) -> Result<(), AppError> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(req.email))
            .one(&state.db)
            .await?;

        let Some(model) = model else {
            info!("Password reset requested for an unknown email");
            return Ok(());
        };

        let token_value = uuid::Uuid::new_v4().to_string();
        let token = password_reset_token::ActiveModel {
            user_id: Set(model.user_id),
            token: Set(token_value.clone()),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };
        token.insert(&state.db).await?;

        info!(user_id = model.user_id, "Password reset requested");

        let link = format!(
            "{}/password-reset/{}/{}",
            state.config.frontend_base_url.trim_end_matches('/'),
            model.user_id,
            token_value
        );
        let body = format!(
            "Hi {},\n\nReset your EventBook password here:\n{}\n\n\
             If you did not request this, you can ignore this message.",
            model.first_name, link
        );

        if let Err(e) = state
            .mailer
            .send(&model.email, "Reset your EventBook password", &body)
            .await
        {
            warn!(
                user_id = model.user_id,
                error = %e.message(),
                "Password reset mail failed"
            );
        }

        Ok(())
    }

    /// Complete a password reset with the uid/token pair from the link.
    pub async fn reset_password_confirm(
        state: AppState,
        req: ResetPasswordConfirmRequest,
    ) -> Result<(), AppError> {
        let user_id: i64 = req.uid.parse().map_err(|_| {
            AppError::PasswordResetInvalid("Invalid password reset link.".to_string())
        })?;

        let token = password_reset_token::Entity::find()
            .filter(password_reset_token::Column::UserId.eq(user_id))
            .filter(password_reset_token::Column::Token.eq(req.token))
            .one(&state.db)
            .await?
            .ok_or_else(|| {
                AppError::PasswordResetInvalid("Invalid password reset link.".to_string())
            })?;

        let model = user::Entity::find_by_id(user_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| {
                AppError::PasswordResetInvalid("Invalid password reset link.".to_string())
            })?;

        let password_hash = bcrypt::hash(&req.new_password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::InternalError(format!("Password hashing failed: {}", e)))?;

        let mut active: user::ActiveModel = model.into();
        active.password = Set(password_hash);
        active.update(&state.db).await?;

        // Tokens are single-use
        token.delete(&state.db).await?;

        info!(user_id = user_id, "Password reset completed");

        Ok(())
    }

    /// Email/password login for active accounts.
    pub async fn login(state: AppState, req: LoginRequest) -> Result<TokenResponse, AppError> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(req.email))
            .one(&state.db)
            .await?
            .ok_or_else(|| {
                AppError::InvalidCredentials("Invalid email or password.".to_string())
            })?;

        if !bcrypt::verify(&req.password, &model.password).unwrap_or(false) {
            return Err(AppError::InvalidCredentials(
                "Invalid email or password.".to_string(),
            ));
        }

        if !model.is_active {
            return Err(AppError::AccountInactive(
                "Account is not activated yet.".to_string(),
            ));
        }

        let token = encode_token(
            model.user_id.to_string(),
            &state.config.jwt_secret,
            state.config.jwt_expiration,
        )?;

        let user_id = model.user_id;
        let mut active: user::ActiveModel = model.into();
        active.last_login = Set(Some(Utc::now().naive_utc()));
        active.update(&state.db).await?;

        info!(user_id = user_id, "User logged in");

        Ok(TokenResponse { auth_token: token })
    }

    /// Profile of the authenticated user.
    pub async fn me(state: AppState, user_id: i64) -> Result<CurrentUserResponse, AppError> {
        let model = user::Entity::find_by_id(user_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Unknown user.".to_string()))?;

        Ok(model.into())
    }
}
