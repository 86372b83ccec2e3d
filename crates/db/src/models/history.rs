//! Reading history model and DTOs.

use inkwell_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `reading_history` table. `updated_at` is the last read.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HistoryEntry {
    pub id: DbId,
    pub user_id: DbId,
    pub chapter_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct RecordHistory {
    pub user_id: DbId,
    pub chapter_id: DbId,
}
