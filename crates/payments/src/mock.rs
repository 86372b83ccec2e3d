//! In-memory gateway for development and tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::PaymentError;
use crate::gateway::{IntentStatus, PaymentGateway, PaymentIntent};

/// Issues `pi_mock_N` intents. Retrieved intents report `succeeded` unless
/// a test overrides the status with [`MockGateway::set_status`].
pub struct MockGateway {
    currency: String,
    next_id: AtomicU64,
    intents: Mutex<HashMap<String, PaymentIntent>>,
}

impl MockGateway {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            next_id: AtomicU64::new(1),
            intents: Mutex::new(HashMap::new()),
        }
    }

    /// Force the status reported for an intent. Returns `false` if unknown.
    pub fn set_status(&self, id: &str, status: IntentStatus) -> bool {
        let mut intents = self.intents.lock().unwrap_or_else(|e| e.into_inner());
        match intents.get_mut(id) {
            Some(intent) => {
                intent.status = status;
                true
            }
            None => false,
        }
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new("usd")
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn create_intent(
        &self,
        amount_cents: i64,
        metadata: BTreeMap<String, String>,
    ) -> Result<PaymentIntent, PaymentError> {
        if amount_cents <= 0 {
            return Err(PaymentError::InvalidAmount(amount_cents));
        }
        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        let id = format!("pi_mock_{n}");
        let intent = PaymentIntent {
            client_secret: Some(format!("{id}_secret_mock")),
            id: id.clone(),
            amount_cents,
            currency: self.currency.clone(),
            status: IntentStatus::Succeeded,
            metadata,
        };
        self.intents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(id, intent.clone());
        Ok(intent)
    }

    async fn retrieve_intent(&self, id: &str) -> Result<PaymentIntent, PaymentError> {
        self.intents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(id)
            .cloned()
            .ok_or_else(|| PaymentError::IntentNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[tokio::test]
    async fn issues_sequential_ids() {
        let gateway = MockGateway::default();
        let a = gateway.create_intent(100, BTreeMap::new()).await.unwrap();
        let b = gateway.create_intent(200, BTreeMap::new()).await.unwrap();
        assert_eq!(a.id, "pi_mock_1");
        assert_eq!(b.id, "pi_mock_2");
        assert_eq!(b.client_secret.as_deref(), Some("pi_mock_2_secret_mock"));
    }

    #[tokio::test]
    async fn retrieved_intent_succeeds_by_default() {
        let gateway = MockGateway::default();
        let intent = gateway.create_intent(999, BTreeMap::new()).await.unwrap();
        let fetched = gateway.retrieve_intent(&intent.id).await.unwrap();
        assert_eq!(fetched.status, IntentStatus::Succeeded);
        assert_eq!(fetched.amount_cents, 999);
    }

    #[tokio::test]
    async fn retrieved_intent_keeps_metadata() {
        let gateway = MockGateway::default();
        let metadata = BTreeMap::from([("purpose".to_string(), "checkout".to_string())]);
        let intent = gateway.create_intent(500, metadata).await.unwrap();
        let fetched = gateway.retrieve_intent(&intent.id).await.unwrap();
        assert_eq!(fetched.metadata_value("purpose"), Some("checkout"));
    }

    #[tokio::test]
    async fn status_can_be_overridden() {
        let gateway = MockGateway::default();
        let intent = gateway.create_intent(999, BTreeMap::new()).await.unwrap();
        assert!(gateway.set_status(&intent.id, IntentStatus::Canceled));
        let fetched = gateway.retrieve_intent(&intent.id).await.unwrap();
        assert_eq!(fetched.status, IntentStatus::Canceled);
    }

    #[tokio::test]
    async fn rejects_non_positive_amounts() {
        let gateway = MockGateway::default();
        assert_matches!(
            gateway.create_intent(0, BTreeMap::new()).await,
            Err(PaymentError::InvalidAmount(0))
        );
    }

    #[tokio::test]
    async fn unknown_intent_is_not_found() {
        let gateway = MockGateway::default();
        assert_matches!(
            gateway.retrieve_intent("pi_missing").await,
            Err(PaymentError::IntentNotFound(_))
        );
    }
}
