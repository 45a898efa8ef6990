//! Transactional mail dispatch.
//!
//! Posts messages to an HTTP mail relay. Delivery is best-effort everywhere:
//! callers log failures and carry on, they never fail the request over mail.

use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::utils::error::AppError;

/// Relay message payload.
#[derive(Debug, Serialize)]
pub struct MailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Mail relay client.
#[derive(Debug, Clone)]
pub struct Mailer {
    relay_url: String,
    relay_token: String,
    from: String,
    client: Client,
    /// Whether outbound mail is enabled for this deployment.
    enabled: bool,
}

impl Mailer {
    pub fn new(config: &AppConfig) -> Self {
        let enabled = config.send_booking_emails && !config.mail_relay_url.is_empty();
        if config.send_booking_emails && config.mail_relay_url.is_empty() {
            tracing::warn!("SEND_BOOKING_EMAILS is true but MAIL_RELAY_URL is empty; mail disabled");
        }

        Self {
            relay_url: config.mail_relay_url.clone(),
            relay_token: config.mail_relay_token.clone(),
            from: config.mail_from.clone(),
            client: Client::new(),
            enabled,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Send one message through the relay.
    ///
    /// Returns an error on relay failure; callers decide whether that matters
    /// (for booking confirmations it never does).
    pub async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AppError> {
        if !self.enabled {
            debug!(to = %to, subject = %subject, "Mail disabled, skipping dispatch");
            return Ok(());
        }

        let message = MailMessage {
            from: self.from.clone(),
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        };

        let response = self
            .client
            .post(&self.relay_url)
            .bearer_auth(&self.relay_token)
            .json(&message)
            .send()
            .await
            .map_err(|e| AppError::InternalError(format!("Mail relay request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::InternalError(format!(
                "Mail relay returned {}: {}",
                status, text
            )));
        }

        info!(to = %to, subject = %subject, "Mail dispatched");
        Ok(())
    }
}
