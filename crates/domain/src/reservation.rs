//! Reservation: a booked date interval against a listing.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::date_interval::DateInterval;
use crate::error::{HearthError, ValidationError};
use crate::id::{ListingId, ReservationId, UserId};
use crate::time::{Timestamp, now};

/// An accepted booking. Read-only once stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub listing_id: ListingId,
    pub user_id: UserId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_price: Decimal,
    pub created_at: Timestamp,
}

impl Reservation {
    /// Turn an accepted request into a stored reservation.
    #[must_use]
    pub fn from_request(request: &NewReservation) -> Self {
        Self {
            id: ReservationId::new(),
            listing_id: request.listing_id,
            user_id: request.user_id,
            start_date: request.range.start(),
            end_date: request.range.end(),
            total_price: request.total_price,
            created_at: now(),
        }
    }

    /// The occupied span.
    ///
    /// Rows that somehow carry `end_date < start_date` are treated as the
    /// single day `start_date`; constructors never produce them.
    #[must_use]
    pub fn interval(&self) -> DateInterval {
        DateInterval::new(self.start_date, self.end_date)
            .unwrap_or_else(|_| DateInterval::single_day(self.start_date))
    }
}

/// Body of a reservation request, together with the requesting user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReservation {
    pub listing_id: ListingId,
    pub user_id: UserId,
    pub range: DateInterval,
    pub total_price: Decimal,
}

impl NewReservation {
    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::NonPositivePrice`] when the total is zero or
    ///   negative
    /// - [`ValidationError::RangeTooLong`] or [`ValidationError::DateOutOfRange`]
    ///   when the range fails [`DateInterval::check_stay`]
    pub fn validate(&self) -> Result<(), HearthError> {
        if self.total_price <= Decimal::ZERO {
            return Err(ValidationError::NonPositivePrice.into());
        }
        self.range.check_stay()?;
        Ok(())
    }
}
