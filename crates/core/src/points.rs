//! Reader point balance arithmetic.
//!
//! Points are spent to unlock chapters and topped up by subscriptions.

use serde::Deserialize;

use crate::error::CoreError;

/// Points charged to unlock a locked chapter, unless configured otherwise.
pub const DEFAULT_UNLOCK_COST: i64 = 100;

/// A requested change to a user's point balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointsChange {
    /// Overwrite the balance.
    Set(i64),
    /// Subtract from the balance; fails if the balance is too low.
    Deduct(i64),
    /// Add to the balance.
    Add(i64),
}

/// Wire form of a points update: exactly one field must be present.
#[derive(Debug, Default, Deserialize)]
pub struct PointsChangeRequest {
    pub points: Option<i64>,
    pub deduct: Option<i64>,
    pub add: Option<i64>,
}

impl TryFrom<PointsChangeRequest> for PointsChange {
    type Error = CoreError;

    fn try_from(req: PointsChangeRequest) -> Result<Self, Self::Error> {
        match (req.points, req.deduct, req.add) {
            (Some(p), None, None) => Ok(PointsChange::Set(p)),
            (None, Some(d), None) => Ok(PointsChange::Deduct(d)),
            (None, None, Some(a)) => Ok(PointsChange::Add(a)),
            (None, None, None) => Err(CoreError::Validation(
                "Either 'points', 'deduct', or 'add' must be provided".to_string(),
            )),
            _ => Err(CoreError::Validation(
                "Only one of 'points', 'deduct', or 'add' may be provided".to_string(),
            )),
        }
    }
}

/// Apply `change` to `current`, returning the new balance.
pub fn apply(current: i64, change: PointsChange) -> Result<i64, CoreError> {
    match change {
        PointsChange::Set(p) if p < 0 => Err(CoreError::Validation(
            "points must not be negative".to_string(),
        )),
        PointsChange::Set(p) => Ok(p),
        PointsChange::Deduct(d) | PointsChange::Add(d) if d < 0 => Err(CoreError::Validation(
            "amount must not be negative".to_string(),
        )),
        PointsChange::Deduct(d) if d > current => Err(CoreError::InsufficientPoints {
            required: d,
            available: current,
        }),
        PointsChange::Deduct(d) => Ok(current - d),
        PointsChange::Add(a) => current
            .checked_add(a)
            .ok_or_else(|| CoreError::Validation("point balance overflow".to_string())),
    }
}
