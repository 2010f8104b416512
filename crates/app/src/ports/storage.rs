//! Storage port — repository traits for persistence.

use std::future::Future;

use hearth_domain::error::HearthError;
use hearth_domain::id::{ListingId, ReservationId, UserId};
use hearth_domain::listing::{Category, Listing};
use hearth_domain::reservation::Reservation;
use hearth_domain::user::User;

/// Repository for persisting and querying [`Listing`]s.
pub trait ListingRepository {
    fn create(&self, listing: Listing) -> impl Future<Output = Result<Listing, HearthError>> + Send;

    fn get_by_id(
        &self,
        id: ListingId,
    ) -> impl Future<Output = Result<Option<Listing>, HearthError>> + Send;

    /// All listings, newest first.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Listing>, HearthError>> + Send;

    /// Listings of a single category, newest first.
    fn find_by_category(
        &self,
        category: Category,
    ) -> impl Future<Output = Result<Vec<Listing>, HearthError>> + Send;

    /// Delete a listing together with its reservations.
    fn delete(&self, id: ListingId) -> impl Future<Output = Result<(), HearthError>> + Send;
}

/// Repository for persisting and querying [`Reservation`]s.
pub trait ReservationRepository {
    fn create(
        &self,
        reservation: Reservation,
    ) -> impl Future<Output = Result<Reservation, HearthError>> + Send;

    fn get_by_id(
        &self,
        id: ReservationId,
    ) -> impl Future<Output = Result<Option<Reservation>, HearthError>> + Send;

    /// Reservations held against a listing, ordered by start date.
    fn find_by_listing(
        &self,
        listing_id: ListingId,
    ) -> impl Future<Output = Result<Vec<Reservation>, HearthError>> + Send;

    /// Reservations made by a user, ordered by start date.
    fn find_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<Reservation>, HearthError>> + Send;

    fn delete(&self, id: ReservationId) -> impl Future<Output = Result<(), HearthError>> + Send;
}

/// Repository for persisting and querying [`User`]s.
pub trait UserRepository {
    fn create(&self, user: User) -> impl Future<Output = Result<User, HearthError>> + Send;

    fn get_by_id(&self, id: UserId)
    -> impl Future<Output = Result<Option<User>, HearthError>> + Send;
}

impl<T: ListingRepository + Send + Sync> ListingRepository for std::sync::Arc<T> {
    fn create(&self, listing: Listing) -> impl Future<Output = Result<Listing, HearthError>> + Send {
        (**self).create(listing)
    }

    fn get_by_id(
        &self,
        id: ListingId,
    ) -> impl Future<Output = Result<Option<Listing>, HearthError>> + Send {
        (**self).get_by_id(id)
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Listing>, HearthError>> + Send {
        (**self).get_all()
    }

    fn find_by_category(
        &self,
        category: Category,
    ) -> impl Future<Output = Result<Vec<Listing>, HearthError>> + Send {
        (**self).find_by_category(category)
    }

    fn delete(&self, id: ListingId) -> impl Future<Output = Result<(), HearthError>> + Send {
        (**self).delete(id)
    }
}

impl<T: ReservationRepository + Send + Sync> ReservationRepository for std::sync::Arc<T> {
    fn create(
        &self,
        reservation: Reservation,
    ) -> impl Future<Output = Result<Reservation, HearthError>> + Send {
        (**self).create(reservation)
    }

    fn get_by_id(
        &self,
        id: ReservationId,
    ) -> impl Future<Output = Result<Option<Reservation>, HearthError>> + Send {
        (**self).get_by_id(id)
    }

    fn find_by_listing(
        &self,
        listing_id: ListingId,
    ) -> impl Future<Output = Result<Vec<Reservation>, HearthError>> + Send {
        (**self).find_by_listing(listing_id)
    }

    fn find_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<Reservation>, HearthError>> + Send {
        (**self).find_by_user(user_id)
    }

    fn delete(&self, id: ReservationId) -> impl Future<Output = Result<(), HearthError>> + Send {
        (**self).delete(id)
    }
}

impl<T: UserRepository + Send + Sync> UserRepository for std::sync::Arc<T> {
    fn create(&self, user: User) -> impl Future<Output = Result<User, HearthError>> + Send {
        (**self).create(user)
    }

    fn get_by_id(&self, id: UserId)
    -> impl Future<Output = Result<Option<User>, HearthError>> + Send {
        (**self).get_by_id(id)
    }
}
