//! Stripe PaymentIntents client over plain HTTPS.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::PaymentError;
use crate::gateway::{PaymentGateway, PaymentIntent};

/// HTTP request timeout for a single Stripe call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct StripeGateway {
    client: reqwest::Client,
    secret_key: String,
    api_base: String,
    currency: String,
}

#[derive(Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Deserialize)]
struct StripeErrorDetail {
    message: Option<String>,
}

impl StripeGateway {
    pub fn new(
        secret_key: String,
        api_base: String,
        currency: String,
    ) -> Result<Self, PaymentError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            secret_key,
            api_base: api_base.trim_end_matches('/').to_string(),
            currency,
        })
    }

    /// Decode a Stripe response, turning non-2xx bodies into `PaymentError::Api`.
    async fn parse(response: reqwest::Response) -> Result<PaymentIntent, PaymentError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<PaymentIntent>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<StripeErrorBody>(&body)
            .ok()
            .and_then(|b| b.error.message)
            .unwrap_or(body);
        tracing::warn!(status = status.as_u16(), %message, "Stripe request rejected");
        Err(PaymentError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_intent(
        &self,
        amount_cents: i64,
        metadata: BTreeMap<String, String>,
    ) -> Result<PaymentIntent, PaymentError> {
        if amount_cents <= 0 {
            return Err(PaymentError::InvalidAmount(amount_cents));
        }

        let mut form: Vec<(String, String)> = vec![
            ("amount".into(), amount_cents.to_string()),
            ("currency".into(), self.currency.clone()),
            ("automatic_payment_methods[enabled]".into(), "true".into()),
        ];
        form.extend(
            metadata
                .into_iter()
                .map(|(k, v)| (format!("metadata[{k}]"), v)),
        );

        let response = self
            .client
            .post(format!("{}/v1/payment_intents", self.api_base))
            .bearer_auth(&self.secret_key)
            .form(&form)
            .send()
            .await?;
        let intent = Self::parse(response).await?;
        tracing::info!(intent_id = %intent.id, amount_cents, "Created Stripe payment intent");
        Ok(intent)
    }

    async fn retrieve_intent(&self, id: &str) -> Result<PaymentIntent, PaymentError> {
        let response = self
            .client
            .get(format!("{}/v1/payment_intents/{id}", self.api_base))
            .bearer_auth(&self.secret_key)
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(PaymentError::IntentNotFound(id.to_string()));
        }
        Self::parse(response).await
    }
}
