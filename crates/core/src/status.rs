//! String-backed status enums stored in `TEXT` columns.
//!
//! Each enum round-trips through its database/JSON representation via
//! [`as_str`](UserStatus::as_str) and [`FromStr`]. Parse errors list the
//! accepted values so they can be surfaced verbatim in 400 responses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $( $variant:ident => $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The canonical string stored in the database.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    other => {
                        let allowed: Vec<&str> = $name::ALL.iter().map(|v| v.as_str()).collect();
                        Err(format!(
                            "Invalid {} '{other}'. Must be one of: {}",
                            $label,
                            allowed.join(", ")
                        ))
                    }
                }
            }
        }
    };
}

string_enum! {
    /// Account status of a reader.
    UserStatus, "user status" {
        Active => "active",
        Inactive => "inactive",
    }
}

string_enum! {
    /// Premium subscription tier currently held by a user.
    SubscriberStatus, "subscriber status" {
        None => "NONE",
        Monthly => "MONTHLY",
        Quarterly => "QUARTERLY",
        Yearly => "YEARLY",
    }
}

string_enum! {
    /// Publication status of a comic series.
    ComicStatus, "comic status" {
        Ongoing => "ongoing",
        Completed => "completed",
        Hiatus => "hiatus",
    }
}

string_enum! {
    /// Moderation status of a discussion thread.
    ThreadStatus, "thread status" {
        Published => "published",
        Archived => "archived",
        Deleted => "deleted",
    }
}

string_enum! {
    /// Billing period of a premium plan.
    PlanDuration, "plan duration" {
        Monthly => "MONTHLY",
        Quarterly => "QUARTERLY",
        Yearly => "YEARLY",
    }
}

impl From<PlanDuration> for SubscriberStatus {
    fn from(duration: PlanDuration) -> Self {
        match duration {
            PlanDuration::Monthly => SubscriberStatus::Monthly,
            PlanDuration::Quarterly => SubscriberStatus::Quarterly,
            PlanDuration::Yearly => SubscriberStatus::Yearly,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_str() {
        for status in ComicStatus::ALL {
            assert_eq!(status.as_str().parse::<ComicStatus>().unwrap(), *status);
        }
        for status in ThreadStatus::ALL {
            assert_eq!(status.as_str().parse::<ThreadStatus>().unwrap(), *status);
        }
    }

    #[test]
    fn parse_error_lists_allowed_values() {
        let err = "paused".parse::<ComicStatus>().unwrap_err();
        assert_eq!(
            err,
            "Invalid comic status 'paused'. Must be one of: ongoing, completed, hiatus"
        );
    }

    #[test]
    fn user_status_is_case_sensitive() {
        assert!("Active".parse::<UserStatus>().is_err());
        assert_eq!("inactive".parse::<UserStatus>().unwrap(), UserStatus::Inactive);
    }

    #[test]
    fn serde_uses_database_representation() {
        let json = serde_json::to_string(&SubscriberStatus::Quarterly).unwrap();
        assert_eq!(json, "\"QUARTERLY\"");
        let parsed: ThreadStatus = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(parsed, ThreadStatus::Archived);
    }

    #[test]
    fn plan_duration_maps_to_subscriber_status() {
        assert_eq!(
            SubscriberStatus::from(PlanDuration::Yearly),
            SubscriberStatus::Yearly
        );
    }
}
