use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::PaymentError;

/// Lifecycle state of a payment intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentStatus {
    RequiresPaymentMethod,
    RequiresConfirmation,
    RequiresAction,
    Processing,
    RequiresCapture,
    Succeeded,
    Canceled,
    #[serde(other)]
    Other,
}

/// A payment intent as seen by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    /// Secret handed to the browser to confirm the payment.
    pub client_secret: Option<String>,
    #[serde(rename = "amount")]
    pub amount_cents: i64,
    pub currency: String,
    pub status: IntentStatus,
    /// Tags attached when the intent was created.
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl PaymentIntent {
    /// Metadata value for `key`, if present.
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }
}

/// A card-payment provider.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create an intent for `amount_cents`, tagged with `metadata`.
    async fn create_intent(
        &self,
        amount_cents: i64,
        metadata: BTreeMap<String, String>,
    ) -> Result<PaymentIntent, PaymentError>;

    /// Look up an intent by id.
    async fn retrieve_intent(&self, id: &str) -> Result<PaymentIntent, PaymentError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_maps_to_other() {
        let status: IntentStatus = serde_json::from_str("\"something_new\"").unwrap();
        assert_eq!(status, IntentStatus::Other);
    }

    #[test]
    fn intent_reads_stripe_field_names() {
        let intent: PaymentIntent = serde_json::from_value(serde_json::json!({
            "id": "pi_1",
            "client_secret": "pi_1_secret_x",
            "amount": 999,
            "currency": "usd",
            "status": "requires_payment_method",
            "object": "payment_intent"
        }))
        .unwrap();
        assert_eq!(intent.amount_cents, 999);
        assert_eq!(intent.status, IntentStatus::RequiresPaymentMethod);
        assert!(intent.metadata.is_empty());
    }

    #[test]
    fn intent_reads_metadata() {
        let intent: PaymentIntent = serde_json::from_value(serde_json::json!({
            "id": "pi_2",
            "client_secret": null,
            "amount": 2499,
            "currency": "usd",
            "status": "succeeded",
            "metadata": { "purpose": "subscription", "user_id": "7" }
        }))
        .unwrap();
        assert_eq!(intent.metadata_value("purpose"), Some("subscription"));
        assert_eq!(intent.metadata_value("user_id"), Some("7"));
        assert_eq!(intent.metadata_value("plan_id"), None);
    }
}
