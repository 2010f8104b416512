//! Reservation service: accepting, listing and cancelling bookings.

use std::future::Future;

use tokio::sync::Mutex;

use hearth_domain::availability::disabled_dates;
use hearth_domain::error::{ConflictError, HearthError, NotFoundError, ValidationError};
use hearth_domain::event::{Event, EventType};
use hearth_domain::id::{ListingId, ReservationId, UserId};
use hearth_domain::reservation::{NewReservation, Reservation};

use crate::ports::{
    EventPublisher, ListingRepository, ReservationGateway, ReservationRepository, UserRepository,
};

pub struct ReservationService<LR, RR, UR, EP> {
    listings: LR,
    reservations: RR,
    users: UR,
    publisher: EP,
    /// Serializes the availability check with the insert that follows it.
    create_lock: Mutex<()>,
}

impl<LR, RR, UR, EP> ReservationService<LR, RR, UR, EP>
where
    LR: ListingRepository,
    RR: ReservationRepository,
    UR: UserRepository,
    EP: EventPublisher,
{
    pub fn new(listings: LR, reservations: RR, users: UR, publisher: EP) -> Self {
        Self {
            listings,
            reservations,
            users,
            publisher,
            create_lock: Mutex::new(()),
        }
    }

    /// Accept a reservation request.
    ///
    /// The requested days must not intersect the listing's disabled dates,
    /// start and end days included.
    ///
    /// # Errors
    ///
    /// - [`HearthError::Validation`] when the total is not positive or the
    ///   listing's category does not take reservations
    /// - [`HearthError::NotFound`] when the listing or user does not exist
    /// - [`HearthError::Conflict`] when any requested day is already booked
    /// - a storage error propagated from a repository
    pub async fn create_reservation(
        &self,
        request: NewReservation,
    ) -> Result<Reservation, HearthError> {
        request.validate()?;

        let listing = self
            .listings
            .get_by_id(request.listing_id)
            .await?
            .ok_or_else(|| NotFoundError {
                entity: "Listing",
                id: request.listing_id.to_string(),
            })?;
        if !listing.supports_reservation() {
            return Err(
                ValidationError::ReservationNotSupported(listing.category.to_string()).into(),
            );
        }
        if self.users.get_by_id(request.user_id).await?.is_none() {
            return Err(NotFoundError {
                entity: "User",
                id: request.user_id.to_string(),
            }
            .into());
        }

        let _guard = self.create_lock.lock().await;

        let existing = self.reservations.find_by_listing(request.listing_id).await?;
        let overlapping = existing
            .iter()
            .filter(|reservation| reservation.interval().overlaps(&request.range));
        if let Some(first) = disabled_dates(overlapping).first_conflict(&request.range) {
            tracing::warn!(
                listing_id = %request.listing_id,
                %first,
                "reservation rejected, dates unavailable"
            );
            return Err(ConflictError::DatesUnavailable { first }.into());
        }

        let reservation = self
            .reservations
            .create(Reservation::from_request(&request))
            .await?;
        tracing::info!(
            reservation_id = %reservation.id,
            listing_id = %reservation.listing_id,
            start = %reservation.start_date,
            end = %reservation.end_date,
            total = %reservation.total_price,
            "reservation created"
        );

        self.publisher
            .publish(Event::new(
                EventType::ReservationCreated,
                reservation.listing_id,
                Some(reservation.id),
            ))
            .await?;
        Ok(reservation)
    }

    /// Look up a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::NotFound`] when no reservation with `id` exists.
    pub async fn get_reservation(&self, id: ReservationId) -> Result<Reservation, HearthError> {
        self.reservations.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Reservation",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Reservations held against a listing.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_for_listing(
        &self,
        listing_id: ListingId,
    ) -> Result<Vec<Reservation>, HearthError> {
        self.reservations.find_by_listing(listing_id).await
    }

    /// Reservations made by a user (their trips).
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Reservation>, HearthError> {
        self.reservations.find_by_user(user_id).await
    }

    /// Cancel a reservation, freeing its days.
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::NotFound`] when no reservation with `id` exists.
    pub async fn cancel_reservation(&self, id: ReservationId) -> Result<(), HearthError> {
        let reservation = self.get_reservation(id).await?;
        self.reservations.delete(id).await?;
        tracing::info!(reservation_id = %id, listing_id = %reservation.listing_id, "reservation cancelled");

        self.publisher
            .publish(Event::new(
                EventType::ReservationCancelled,
                reservation.listing_id,
                Some(id),
            ))
            .await
    }
}

impl<LR, RR, UR, EP> ReservationGateway for ReservationService<LR, RR, UR, EP>
where
    LR: ListingRepository + Send + Sync,
    RR: ReservationRepository + Send + Sync,
    UR: UserRepository + Send + Sync,
    EP: EventPublisher + Send + Sync,
{
    fn create_reservation(
        &self,
        request: NewReservation,
    ) -> impl Future<Output = Result<(), HearthError>> + Send {
        async move {
            Self::create_reservation(self, request).await?;
            Ok(())
        }
    }

    fn fetch_reservations(
        &self,
        listing_id: ListingId,
    ) -> impl Future<Output = Result<Vec<Reservation>, HearthError>> + Send {
        self.list_for_listing(listing_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{
        InMemoryListingRepo, InMemoryReservationRepo, InMemoryUserRepo, RecordingPublisher,
    };
    use chrono::NaiveDate;
    use hearth_domain::date_interval::DateInterval;
    use hearth_domain::listing::{Category, Listing};
    use hearth_domain::user::User;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    type Service = ReservationService<
        Arc<InMemoryListingRepo>,
        Arc<InMemoryReservationRepo>,
        Arc<InMemoryUserRepo>,
        Arc<RecordingPublisher>,
    >;

    struct Fixture {
        svc: Service,
        publisher: Arc<RecordingPublisher>,
        guest: User,
        stay: Listing,
        for_sale: Listing,
    }

    async fn fixture() -> Fixture {
        let users = Arc::new(InMemoryUserRepo::default());
        let listings = Arc::new(InMemoryListingRepo::default());
        let guest = users
            .create(User::new("Guest", "guest@example.com").unwrap())
            .await
            .unwrap();
        let stay = listings
            .create(
                Listing::builder()
                    .title("Beach house")
                    .price(dec!(100))
                    .category(Category::Airbnb)
                    .build()
                    .unwrap(),
            )
            .await
            .unwrap();
        let for_sale = listings
            .create(
                Listing::builder()
                    .title("Old barn")
                    .price(dec!(90000))
                    .category(Category::Sale)
                    .build()
                    .unwrap(),
            )
            .await
            .unwrap();
        let publisher = Arc::new(RecordingPublisher::default());
        let svc = ReservationService::new(
            listings,
            Arc::new(InMemoryReservationRepo::default()),
            users,
            Arc::clone(&publisher),
        );
        Fixture {
            svc,
            publisher,
            guest,
            stay,
            for_sale,
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn request(fx: &Fixture, listing: &Listing, start: u32, end: u32) -> NewReservation {
        NewReservation {
            listing_id: listing.id,
            user_id: fx.guest.id,
            range: DateInterval::new(day(start), day(end)).unwrap(),
            total_price: dec!(200),
        }
    }

    #[tokio::test]
    async fn should_create_reservation_and_publish_event() {
        let fx = fixture().await;
        let created = fx
            .svc
            .create_reservation(request(&fx, &fx.stay, 10, 12))
            .await
            .unwrap();

        assert_eq!(created.start_date, day(10));
        assert_eq!(created.end_date, day(12));

        let events = fx.publisher.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, EventType::ReservationCreated);
        assert_eq!(events[0].reservation_id, Some(created.id));
    }

    #[tokio::test]
    async fn should_reject_overlapping_reservation() {
        let fx = fixture().await;
        fx.svc
            .create_reservation(request(&fx, &fx.stay, 10, 12))
            .await
            .unwrap();

        let result = fx
            .svc
            .create_reservation(request(&fx, &fx.stay, 12, 14))
            .await;
        assert!(matches!(
            result,
            Err(HearthError::Conflict(ConflictError::DatesUnavailable { first })) if first == day(12)
        ));
    }

    #[tokio::test]
    async fn should_accept_only_one_of_two_concurrent_overlapping_reservations() {
        let fx = fixture().await;
        let (first, second) = tokio::join!(
            fx.svc.create_reservation(request(&fx, &fx.stay, 10, 12)),
            fx.svc.create_reservation(request(&fx, &fx.stay, 11, 13)),
        );

        let accepted = [&first, &second].iter().filter(|r| r.is_ok()).count();
        assert_eq!(accepted, 1);
        assert!(
            [first, second].into_iter().any(|r| matches!(
                r,
                Err(HearthError::Conflict(ConflictError::DatesUnavailable { .. }))
            ))
        );
        assert_eq!(fx.svc.list_for_listing(fx.stay.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_reject_reservation_spanning_more_than_a_year() {
        let fx = fixture().await;
        let mut req = request(&fx, &fx.stay, 10, 12);
        req.range =
            DateInterval::new(day(1), NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()).unwrap();
        let result = fx.svc.create_reservation(req).await;
        assert!(matches!(
            result,
            Err(HearthError::Validation(ValidationError::RangeTooLong { .. }))
        ));
        assert!(fx.svc.list_for_listing(fx.stay.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_accept_adjacent_reservation() {
        let fx = fixture().await;
        fx.svc
            .create_reservation(request(&fx, &fx.stay, 10, 12))
            .await
            .unwrap();
        fx.svc
            .create_reservation(request(&fx, &fx.stay, 13, 15))
            .await
            .unwrap();

        let all = fx.svc.list_for_listing(fx.stay.id).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn should_reject_reservation_for_listing_that_is_not_bookable() {
        let fx = fixture().await;
        let result = fx
            .svc
            .create_reservation(request(&fx, &fx.for_sale, 10, 12))
            .await;
        assert!(matches!(
            result,
            Err(HearthError::Validation(
                ValidationError::ReservationNotSupported(_)
            ))
        ));
    }

    #[tokio::test]
    async fn should_reject_reservation_for_unknown_user() {
        let fx = fixture().await;
        let mut req = request(&fx, &fx.stay, 10, 12);
        req.user_id = UserId::new();
        let result = fx.svc.create_reservation(req).await;
        assert!(matches!(result, Err(HearthError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_reject_reservation_with_zero_total() {
        let fx = fixture().await;
        let mut req = request(&fx, &fx.stay, 10, 12);
        req.total_price = dec!(0);
        let result = fx.svc.create_reservation(req).await;
        assert!(matches!(
            result,
            Err(HearthError::Validation(ValidationError::NonPositivePrice))
        ));
    }

    #[tokio::test]
    async fn should_free_dates_when_cancelled() {
        let fx = fixture().await;
        let created = fx
            .svc
            .create_reservation(request(&fx, &fx.stay, 10, 12))
            .await
            .unwrap();

        fx.svc.cancel_reservation(created.id).await.unwrap();

        assert!(fx.svc.list_for_user(fx.guest.id).await.unwrap().is_empty());
        fx.svc
            .create_reservation(request(&fx, &fx.stay, 10, 12))
            .await
            .unwrap();

        let events = fx.publisher.events.lock().unwrap();
        assert_eq!(events[1].event_type, EventType::ReservationCancelled);
    }

    #[tokio::test]
    async fn should_return_not_found_when_cancelling_missing_reservation() {
        let fx = fixture().await;
        let result = fx.svc.cancel_reservation(ReservationId::new()).await;
        assert!(matches!(result, Err(HearthError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_serve_as_gateway_for_booking_sessions() {
        let fx = fixture().await;
        ReservationGateway::create_reservation(&fx.svc, request(&fx, &fx.stay, 3, 4))
            .await
            .unwrap();
        let fetched = fx.svc.fetch_reservations(fx.stay.id).await.unwrap();
        assert_eq!(fetched.len(), 1);
    }
}
