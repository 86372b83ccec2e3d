//! Premium subscription constants.

/// Point balance granted to an active subscriber. Large enough that unlock
/// charges never exhaust it in practice.
pub const SUBSCRIBER_POINTS: i64 = 99_999_999;
