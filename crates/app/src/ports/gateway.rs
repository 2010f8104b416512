//! Reservation gateway port: how a booking session reaches the reservation API.
//!
//! In a browser this is `POST /reservations` plus a page refresh; in process it
//! is the [`ReservationService`](crate::services::reservation_service::ReservationService)
//! itself. The session only cares about success or failure of the create call,
//! never about the response body.

use std::future::Future;

use hearth_domain::error::HearthError;
use hearth_domain::id::ListingId;
use hearth_domain::reservation::{NewReservation, Reservation};

pub trait ReservationGateway {
    /// Issue a single create request. No retries.
    fn create_reservation(
        &self,
        request: NewReservation,
    ) -> impl Future<Output = Result<(), HearthError>> + Send;

    /// Fetch the current reservations for a listing.
    fn fetch_reservations(
        &self,
        listing_id: ListingId,
    ) -> impl Future<Output = Result<Vec<Reservation>, HearthError>> + Send;
}

impl<T: ReservationGateway + Send + Sync> ReservationGateway for std::sync::Arc<T> {
    fn create_reservation(
        &self,
        request: NewReservation,
    ) -> impl Future<Output = Result<(), HearthError>> + Send {
        (**self).create_reservation(request)
    }

    fn fetch_reservations(
        &self,
        listing_id: ListingId,
    ) -> impl Future<Output = Result<Vec<Reservation>, HearthError>> + Send {
        (**self).fetch_reservations(listing_id)
    }
}
