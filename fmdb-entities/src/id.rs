use std::{fmt, num::ParseIntError, str::FromStr};

/// Numeric public identifiers as assigned by the relational store.
///
/// Each entity gets its own newtype so that a review id cannot be
/// passed where a market id is expected.
macro_rules! id_type {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
        pub struct $name(i64);

        impl $name {
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(from: i64) -> Self {
                Self(from)
            }
        }

        impl From<$name> for i64 {
            fn from(from: $name) -> Self {
                from.0
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(MarketId);
id_type!(LocationId);
id_type!(ReviewId);
id_type!(CategoryId);
id_type!(
    /// Identifier of a registered user in the external account system.
    UserId
);
