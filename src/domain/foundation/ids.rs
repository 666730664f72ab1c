//! Strongly-typed identifier value objects.
//!
//! Every row in the system is keyed by a database-assigned `BIGINT`, so the
//! identifiers wrap `i64`. Keeping them distinct types stops a patron id from
//! being passed where a staff id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw database identifier.
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Returns the raw database identifier.
            pub const fn as_i64(&self) -> i64 {
                self.0
            }

            /// Database sequences start at 1; anything else can never match a row.
            pub const fn is_assignable(&self) -> bool {
                self.0 > 0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }
    };
}

define_id!(
    /// The owning account boundary. Supplied by the upstream auth layer.
    TenantId
);

define_id!(
    /// A recorded venue booking.
    SessionId
);

define_id!(
    /// A customer of the venue.
    PatronId
);

define_id!(
    /// An employee of the venue.
    StaffId
);

define_id!(
    /// A one-per-day attendance marker.
    AttendanceId
);
