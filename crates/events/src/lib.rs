//! Inkwell event bus and notification writer.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PlatformEvent`]: the domain event envelope.
//! - [`NotificationWriter`]: background service turning user-facing events
//!   into rows in the `notifications` table.

pub mod bus;
pub mod notification_writer;

pub use bus::{event_types, EventBus, PlatformEvent};
pub use notification_writer::NotificationWriter;
