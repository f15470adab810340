use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use kernel::gateway::payment::{CheckoutSession, CreateCheckoutSession, PaymentGateway};
use shared::{
    config::PaymentConfig,
    error::{AppError, AppResult},
};

pub struct CheckoutGatewayImpl {
    client: reqwest::Client,
    config: PaymentConfig,
}

#[derive(Deserialize)]
struct CheckoutSessionBody {
    id: String,
    url: String,
}

impl CheckoutGatewayImpl {
    pub fn new(config: PaymentConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::ExternalServiceError(e.to_string()))?;
        Ok(Self { client, config })
    }

    // The success redirect carries the correlation parameters the confirm
    // endpoint re-validates against the stored pending booking.
    fn success_url(&self, event: &CreateCheckoutSession) -> String {
        format!(
            "{}?bookingId={}&roomId={}&userId={}&checkIn={}&checkOut={}",
            self.config.success_url,
            event.booking_id,
            event.room_id,
            event.user_id,
            event.check_in,
            event.check_out,
        )
    }
}

#[async_trait]
impl PaymentGateway for CheckoutGatewayImpl {
    async fn create_checkout_session(
        &self,
        event: CreateCheckoutSession,
    ) -> AppResult<CheckoutSession> {
        let amount = event.amount.to_string();
        let booking_id = event.booking_id.to_string();
        let success_url = self.success_url(&event);
        let params = [
            ("amount", amount.as_str()),
            ("currency", self.config.currency.as_str()),
            ("product_name", event.product_name.as_str()),
            ("success_url", success_url.as_str()),
            ("cancel_url", self.config.cancel_url.as_str()),
            ("metadata[bookingId]", booking_id.as_str()),
        ];

        let res = self
            .client
            .post(format!("{}/v1/checkout/sessions", self.config.api_base))
            .bearer_auth(&self.config.secret_key)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("checkout session request failed: {e}"))
            })?;

        if !res.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "checkout session creation failed with status {}",
                res.status()
            )));
        }

        let body: CheckoutSessionBody = res.json().await.map_err(|e| {
            AppError::ExternalServiceError(format!("malformed checkout session response: {e}"))
        })?;

        Ok(CheckoutSession {
            session_id: body.id,
            checkout_url: body.url,
        })
    }
}
