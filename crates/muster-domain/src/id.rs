//! Newtype wrappers for domain identifiers.
//!
//! All rows use SQLite integer primary keys, so every id wraps an `i64`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! integer_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }
    };
}

integer_id!(
    /// Identifies a user account (student, teacher or admin).
    UserId
);

integer_id!(
    /// Identifies a training session.
    SessionId
);

integer_id!(
    /// Identifies a single attendance (check-in) record.
    AttendanceId
);

integer_id!(
    /// Identifies an entry in one of the reference catalogs. Unique per catalog only.
    CatalogId
);
