//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - Update DTOs (all `Option` fields) where the resource supports patches

pub mod cart;
pub mod chapter;
pub mod comic;
pub mod comment;
pub mod history;
pub mod notification;
pub mod page;
pub mod premium_plan;
pub mod product;
pub mod receipt;
pub mod thread;
pub mod user;
pub mod waitlist;

use serde::Serializer;

/// Serialize a comma-separated `TEXT` column as a JSON array.
pub(crate) fn serialize_comma_list<S: Serializer>(value: &str, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(inkwell_core::genre::split(value))
}
