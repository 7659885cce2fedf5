//! Identifier value objects
//!
//! - `UserId`: reference to a user account owned by the identity service
//! - `BanId`: primary key of a ban record, assigned once by the store
//!
//! Both wrap an `i64` where zero means "unset".

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Error when parsing an identifier from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    #[error("invalid identifier format")]
    InvalidFormat,
}

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $expecting:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name(i64);

        impl $name {
            /// Create from a raw i64 value
            #[inline]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the inner i64 value
            #[inline]
            pub const fn into_inner(self) -> i64 {
                self.0
            }

            /// Check if the id is zero (unset)
            #[inline]
            pub const fn is_zero(&self) -> bool {
                self.0 == 0
            }

            /// Check if the id can reference a stored row (strictly positive)
            #[inline]
            pub const fn is_valid(&self) -> bool {
                self.0 > 0
            }

            /// Parse from string representation
            pub fn parse(s: &str) -> Result<Self, IdParseError> {
                s.trim()
                    .parse::<i64>()
                    .map($name)
                    .map_err(|_| IdParseError::InvalidFormat)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::parse(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_i64(self.0)
            }
        }

        // Accepts both numbers and numeric strings (form posts send strings)
        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                use serde::de::{self, Visitor};

                struct IdVisitor;

                impl<'de> Visitor<'de> for IdVisitor {
                    type Value = $name;

                    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                        formatter.write_str($expecting)
                    }

                    fn visit_i64<E>(self, value: i64) -> Result<$name, E>
                    where
                        E: de::Error,
                    {
                        Ok($name(value))
                    }

                    fn visit_u64<E>(self, value: u64) -> Result<$name, E>
                    where
                        E: de::Error,
                    {
                        i64::try_from(value)
                            .map($name)
                            .map_err(|_| de::Error::custom("identifier out of range"))
                    }

                    fn visit_str<E>(self, value: &str) -> Result<$name, E>
                    where
                        E: de::Error,
                    {
                        $name::parse(value).map_err(|_| de::Error::custom("invalid identifier string"))
                    }
                }

                deserializer.deserialize_any(IdVisitor)
            }
        }
    };
}

id_type!(
    /// Identity of a user account
    UserId,
    "a string or integer representing a user id"
);

id_type!(
    /// Primary key of a persisted ban record
    BanId,
    "a string or integer representing a ban id"
);
