//! Notification writer service.
//!
//! [`NotificationWriter`] subscribes to the [`EventBus`](crate::bus::EventBus)
//! and writes a `notifications` row for every event a user should hear
//! about. It runs until the bus sender is dropped.

use inkwell_core::notifications;
use inkwell_core::types::DbId;
use inkwell_db::repositories::NotificationRepo;
use inkwell_db::DbPool;
use tokio::sync::broadcast;

use crate::bus::{event_types, PlatformEvent};

/// Background service that persists user-facing notifications.
pub struct NotificationWriter;

impl NotificationWriter {
    /// Run the writer loop. Write failures are logged and the loop continues;
    /// it exits when the channel closes.
    pub async fn run(pool: DbPool, mut receiver: broadcast::Receiver<PlatformEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    let Some((user_id, description)) = Self::describe(&event) else {
                        continue;
                    };
                    match NotificationRepo::create(&pool, user_id, &description).await {
                        Ok(notification) => tracing::debug!(
                            notification_id = notification.id,
                            user_id,
                            event_type = %event.event_type,
                            "Notification written"
                        ),
                        Err(e) => tracing::error!(
                            error = %e,
                            user_id,
                            event_type = %event.event_type,
                            "Failed to write notification"
                        ),
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification writer lagged, events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification writer shutting down");
                    break;
                }
            }
        }
    }

    /// Map an event to its recipient and message. Events without an actor
    /// or with an unknown type produce nothing.
    pub fn describe(event: &PlatformEvent) -> Option<(DbId, String)> {
        let user_id = event.actor_user_id?;
        let text = |key: &str| event.payload[key].as_str().unwrap_or_default().to_string();

        let description = match event.event_type.as_str() {
            event_types::SUBSCRIPTION_ACTIVATED => {
                notifications::subscription_activated(&text("plan_name"))
            }
            event_types::CHECKOUT_COMPLETED => notifications::book_payment_received(),
            event_types::WAITLIST_FULFILLED => {
                notifications::waitlist_fulfilled(&text("comic_name"), &text("volume_name"))
            }
            event_types::CHAPTER_UNLOCKED => notifications::chapter_unlocked(
                &text("comic_name"),
                event.payload["chapter_number"].as_i64().unwrap_or_default() as i32,
                event.payload["cost"].as_i64().unwrap_or_default(),
            ),
            _ => return None,
        };
        Some((user_id, description))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn subscription_message_names_plan() {
        let event = PlatformEvent::new(event_types::SUBSCRIPTION_ACTIVATED)
            .with_actor(5)
            .with_payload(json!({"plan_name": "Monthly Premium"}));
        let (user, text) = NotificationWriter::describe(&event).unwrap();
        assert_eq!(user, 5);
        assert_eq!(
            text,
            "Payment received successfully! You are now subscribed to Monthly Premium."
        );
    }

    #[test]
    fn checkout_message() {
        let event = PlatformEvent::new(event_types::CHECKOUT_COMPLETED).with_actor(2);
        let (_, text) = NotificationWriter::describe(&event).unwrap();
        assert_eq!(text, "Payment received successfully! Your books will come soon.");
    }

    #[test]
    fn unknown_type_is_ignored() {
        let event = PlatformEvent::new("comic.created").with_actor(2);
        assert!(NotificationWriter::describe(&event).is_none());
    }

    #[test]
    fn event_without_actor_is_ignored() {
        let event = PlatformEvent::new(event_types::CHECKOUT_COMPLETED);
        assert!(NotificationWriter::describe(&event).is_none());
    }
}
