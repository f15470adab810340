use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};

use kernel::gateway::notifier::{BookingNotifier, BookingSummary};
use shared::{
    config::MailConfig,
    error::{AppError, AppResult},
};

pub struct MailNotifierImpl {
    client: reqwest::Client,
    config: MailConfig,
}

impl MailNotifierImpl {
    pub fn new(config: MailConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::ExternalServiceError(e.to_string()))?;
        Ok(Self { client, config })
    }

    async fn send(&self, to: &str, subject: &str, body_text: &str) -> AppResult<()> {
        let message = format!(
            "From: {}\r\nTo: {}\r\nSubject: {}\r\nContent-Type: text/plain; charset=UTF-8\r\n\r\n{}",
            self.config.sender, to, subject, body_text
        );
        let raw = general_purpose::URL_SAFE_NO_PAD.encode(message.as_bytes());

        let res = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.token)
            .json(&serde_json::json!({ "raw": raw }))
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("mail request failed: {e}")))?;

        if !res.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "mail delivery failed with status {}",
                res.status()
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl BookingNotifier for MailNotifierImpl {
    async fn send_booking_confirmation(
        &self,
        email: &str,
        summary: &BookingSummary,
    ) -> AppResult<()> {
        let subject = "Your booking is confirmed";
        let body_text = format!(
            "Hello {},\n\nYour booking of {} is confirmed.\nCheck-in: {}\nCheck-out: {}\nTotal: {}\n",
            summary.user_name,
            summary.room_name,
            summary.check_in,
            summary.check_out,
            summary.total_price,
        );
        self.send(email, subject, &body_text).await
    }

    async fn send_cancellation_notice(
        &self,
        email: &str,
        summary: &BookingSummary,
    ) -> AppResult<()> {
        let subject = "Your booking has been cancelled";
        let body_text = format!(
            "Hello {},\n\nYour booking of {} ({} to {}) has been cancelled.\nThe refund of {} will be processed to your account.\n",
            summary.user_name,
            summary.room_name,
            summary.check_in,
            summary.check_out,
            summary.total_price,
        );
        self.send(email, subject, &body_text).await
    }
}
