//! Inkwell domain core.
//!
//! Pure types and rules shared by the repository layer, the HTTP API and
//! the background worker. This crate has no internal dependencies and does
//! no I/O.

pub mod access;
pub mod cache;
pub mod error;
pub mod genre;
pub mod money;
pub mod notifications;
pub mod pages;
pub mod points;
pub mod premium;
pub mod status;
pub mod types;
pub mod waitlist;
