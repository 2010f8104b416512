//! Event: an immutable record of something that happened.
//!
//! Events are produced when listings are created and when reservations are
//! made or cancelled. Subscribers use them to refresh availability views.

use serde::{Deserialize, Serialize};

use crate::id::{EventId, ListingId, ReservationId};
use crate::time::{Timestamp, now};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    ListingCreated,
    ReservationCreated,
    ReservationCancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub event_type: EventType,
    pub listing_id: ListingId,
    pub reservation_id: Option<ReservationId>,
    pub timestamp: Timestamp,
}

impl Event {
    /// Record a new event stamped with the current time.
    #[must_use]
    pub fn new(
        event_type: EventType,
        listing_id: ListingId,
        reservation_id: Option<ReservationId>,
    ) -> Self {
        Self {
            id: EventId::new(),
            event_type,
            listing_id,
            reservation_id,
            timestamp: now(),
        }
    }

    /// Whether this event changes the set of booked days for a listing.
    #[must_use]
    pub fn affects_availability(&self) -> bool {
        matches!(
            self.event_type,
            EventType::ReservationCreated | EventType::ReservationCancelled
        )
    }
}
