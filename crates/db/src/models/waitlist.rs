//! Waitlist entry model.

use inkwell_core::types::{DbId, Timestamp};
use inkwell_core::waitlist::QueuedEntry;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `waitlist_entries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WaitlistEntry {
    pub id: DbId,
    pub user_id: DbId,
    pub product_id: DbId,
    pub queued_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&WaitlistEntry> for QueuedEntry {
    fn from(entry: &WaitlistEntry) -> Self {
        QueuedEntry {
            id: entry.id,
            user_id: entry.user_id,
            product_id: entry.product_id,
            queued_at: entry.queued_at,
        }
    }
}
