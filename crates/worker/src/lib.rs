//! Background work for Inkwell.
//!
//! - [`fulfillment`]: drains the waitlist into carts as stock returns.
//! - [`import`]: scans a folder tree of chapter images and loads them as pages.

pub mod fulfillment;
pub mod import;

pub use fulfillment::{FulfillmentReport, WaitlistFulfiller};
