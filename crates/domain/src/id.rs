//! Typed identifier newtypes backed by UUIDs.
//!
//! Every aggregate gets its own id type so a `ListingId` can never be passed
//! where a `UserId` is expected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(uuid::Uuid);

        impl Default for $name {
            fn default() -> Self {
                Self(uuid::Uuid::new_v4())
            }
        }

        impl $name {
            /// Generate a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }

            /// Parse user-supplied text.
            ///
            /// # Errors
            ///
            /// Returns [`ValidationError::InvalidId`] carrying the rejected input.
            pub fn parse(input: &str) -> Result<Self, ValidationError> {
                uuid::Uuid::parse_str(input)
                    .map(Self)
                    .map_err(|_| ValidationError::InvalidId(input.to_string()))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                uuid::Uuid::parse_str(s).map(Self)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a [`Listing`](crate::listing::Listing).
    ListingId
);

define_id!(
    /// Unique identifier for a [`Reservation`](crate::reservation::Reservation).
    ReservationId
);

define_id!(
    /// Unique identifier for a [`User`](crate::user::User).
    UserId
);

define_id!(
    /// Unique identifier for an [`Event`](crate::event::Event).
    EventId
);
