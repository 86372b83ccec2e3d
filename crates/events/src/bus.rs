//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is shared via `Arc<EventBus>` between the HTTP handlers,
//! the waitlist fulfiller and the notification writer.

use chrono::{DateTime, Utc};
use inkwell_core::types::DbId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Event names published by the platform.
pub mod event_types {
    /// A premium subscription was paid for and applied.
    /// Payload: `{"plan_name", "duration", "transaction_id"}`.
    pub const SUBSCRIPTION_ACTIVATED: &str = "subscription.activated";
    /// A cart was checked out. Payload: `{"payment_intent_id", "amount_cents"}`.
    pub const CHECKOUT_COMPLETED: &str = "checkout.completed";
    /// A waitlist entry moved into its owner's cart.
    /// Payload: `{"product_id", "comic_name", "volume_name"}`.
    pub const WAITLIST_FULFILLED: &str = "waitlist.fulfilled";
    /// A locked chapter was bought with points.
    /// Payload: `{"comic_name", "chapter_number", "cost"}`.
    pub const CHAPTER_UNLOCKED: &str = "chapter.unlocked";
}

// ---------------------------------------------------------------------------
// PlatformEvent
// ---------------------------------------------------------------------------

/// A domain event that occurred on the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformEvent {
    /// Dot-separated event name, e.g. `"checkout.completed"`.
    pub event_type: String,
    pub source_entity_type: Option<String>,
    pub source_entity_id: Option<DbId>,
    /// The user the event concerns.
    pub actor_user_id: Option<DbId>,
    pub payload: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl PlatformEvent {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            source_entity_type: None,
            source_entity_id: None,
            actor_user_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    pub fn with_source(mut self, entity_type: impl Into<String>, entity_id: DbId) -> Self {
        self.source_entity_type = Some(entity_type.into());
        self.source_entity_id = Some(entity_id);
        self
    }

    pub fn with_actor(mut self, user_id: DbId) -> Self {
        self.actor_user_id = Some(user_id);
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// ```rust
/// use inkwell_events::bus::{event_types, EventBus, PlatformEvent};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(PlatformEvent::new(event_types::CHECKOUT_COMPLETED).with_actor(1));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<PlatformEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity. Slow receivers observe
    /// `RecvError::Lagged` once the buffer overflows.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish to all current subscribers; dropped if there are none.
    pub fn publish(&self, event: PlatformEvent) {
        tracing::debug!(event_type = %event.event_type, "Publishing event");
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PlatformEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscriber_receives_enriched_event() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.publish(
            PlatformEvent::new(event_types::WAITLIST_FULFILLED)
                .with_source("waitlist_entry", 3)
                .with_actor(9)
                .with_payload(serde_json::json!({"product_id": 4})),
        );

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.event_type, "waitlist.fulfilled");
        assert_eq!(received.source_entity_id, Some(3));
        assert_eq!(received.actor_user_id, Some(9));
        assert_eq!(received.payload["product_id"], 4);
    }

    #[tokio::test]
    async fn every_subscriber_gets_a_copy() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(PlatformEvent::new(event_types::CHAPTER_UNLOCKED));

        assert_eq!(rx1.recv().await.unwrap().event_type, "chapter.unlocked");
        assert_eq!(rx2.recv().await.unwrap().event_type, "chapter.unlocked");
    }

    #[test]
    fn publish_without_subscribers_is_a_no_op() {
        EventBus::default().publish(PlatformEvent::new("orphan.event"));
    }
}
