//! Typed integer keys.
//!
//! The controller identifies a plant in two unrelated ways: a database id
//! used for deletion and configuration, and the hardware channel it is wired
//! to, used for watering. Both are integers on the wire, so each gets its own
//! newtype.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! define_key {
    ($(#[doc = $doc:expr])* $name:ident($inner:ty)) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name($inner);

        impl $name {
            /// Wrap a raw value received from the controller.
            #[must_use]
            pub const fn new(value: $inner) -> Self {
                Self(value)
            }

            /// Access the raw value.
            #[must_use]
            pub const fn get(self) -> $inner {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

define_key!(
    /// Stable identity of a [`Plant`](crate::plant::Plant); the deletion key.
    PlantId(i64)
);

define_key!(
    /// Fixed hardware slot of a [`Plant`](crate::plant::Plant); the watering key.
    ChannelIndex(i32)
);
