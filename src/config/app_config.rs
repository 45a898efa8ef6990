use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    pub jwt_secret: String,
    pub jwt_expiration: i64,

    /// Deployment toggle: whether booking confirmation mails are actually
    /// dispatched. Off in environments without a configured relay.
    pub send_booking_emails: bool,

    // Mail relay
    pub mail_relay_url: String,
    pub mail_relay_token: String,
    pub mail_from: String,

    /// Base URL used to build account activation links.
    pub frontend_base_url: String,
}

impl AppConfig {
    /// Load settings from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET is not set. It must be configured in production.");
            "secret".to_string()
        });

        let jwt_expiration = env::var("JWT_EXPIRATION")
            .unwrap_or_else(|_| "86400".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidExpiration)?;

        let send_booking_emails = env::var("SEND_BOOKING_EMAILS")
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()
            .unwrap_or_else(|_| {
                tracing::warn!(
                    "Invalid SEND_BOOKING_EMAILS value, defaulting to false. Use 'true' or 'false'."
                );
                false
            });

        let mail_relay_url = env::var("MAIL_RELAY_URL").unwrap_or_default();
        let mail_relay_token = env::var("MAIL_RELAY_TOKEN").unwrap_or_default();
        let mail_from =
            env::var("MAIL_FROM").unwrap_or_else(|_| "noreply@eventbook.example.com".to_string());

        let frontend_base_url = env::var("FRONTEND_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        Ok(Self {
            server_port,
            jwt_secret,
            jwt_expiration,
            send_booking_emails,
            mail_relay_url,
            mail_relay_token,
            mail_from,
            frontend_base_url,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,
    #[error("Invalid expiration time")]
    InvalidExpiration,
}
