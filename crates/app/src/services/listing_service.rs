//! Listing service: listing CRUD plus the availability and pricing views
//! that a listing page is built from.

use rust_decimal::Decimal;
use serde::Serialize;

use hearth_domain::availability::{DisabledDates, disabled_dates};
use hearth_domain::date_interval::DateInterval;
use hearth_domain::error::{HearthError, NotFoundError};
use hearth_domain::event::{Event, EventType};
use hearth_domain::id::ListingId;
use hearth_domain::listing::{Category, Listing};
use hearth_domain::pricing::PriceQuote;
use hearth_domain::reservation::Reservation;
use hearth_domain::user::User;

use crate::ports::{EventPublisher, ListingRepository, ReservationRepository, UserRepository};

/// Everything a listing page needs in one read.
#[derive(Debug, Clone, Serialize)]
pub struct ListingDetail {
    pub listing: Listing,
    /// `None` when the owning account no longer exists.
    pub owner: Option<User>,
    pub reservations: Vec<Reservation>,
    pub disabled_dates: DisabledDates,
    pub supports_reservation: bool,
}

/// Stateless price quote for a proposed stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub nights: u32,
    pub nightly_price: Decimal,
    pub total_price: Decimal,
}

pub struct ListingService<LR, RR, UR, EP> {
    listings: LR,
    reservations: RR,
    users: UR,
    publisher: EP,
}

impl<LR, RR, UR, EP> ListingService<LR, RR, UR, EP>
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
        }
    }

    /// Create a listing owned by an existing user.
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::Validation`] if invariants fail,
    /// [`HearthError::NotFound`] if the owner does not exist, or a storage
    /// error propagated from a repository.
    pub async fn create_listing(&self, listing: Listing) -> Result<Listing, HearthError> {
        listing.validate()?;
        if self.users.get_by_id(listing.owner_id).await?.is_none() {
            return Err(NotFoundError {
                entity: "User",
                id: listing.owner_id.to_string(),
            }
            .into());
        }

        let listing = self.listings.create(listing).await?;
        tracing::info!(listing_id = %listing.id, category = %listing.category, "listing created");

        self.publisher
            .publish(Event::new(EventType::ListingCreated, listing.id, None))
            .await?;
        Ok(listing)
    }

    /// Look up a listing by id.
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::NotFound`] when no listing with `id` exists.
    pub async fn get_listing(&self, id: ListingId) -> Result<Listing, HearthError> {
        self.listings.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Listing",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List listings, optionally restricted to one category.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_listings(
        &self,
        category: Option<Category>,
    ) -> Result<Vec<Listing>, HearthError> {
        match category {
            Some(category) => self.listings.find_by_category(category).await,
            None => self.listings.get_all().await,
        }
    }

    /// Delete a listing.
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::NotFound`] if the listing does not exist.
    pub async fn delete_listing(&self, id: ListingId) -> Result<(), HearthError> {
        self.get_listing(id).await?;
        self.listings.delete(id).await?;
        tracing::info!(listing_id = %id, "listing deleted");
        Ok(())
    }

    /// Listing together with its owner, reservations and blocked days.
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::NotFound`] if the listing does not exist.
    pub async fn listing_detail(&self, id: ListingId) -> Result<ListingDetail, HearthError> {
        let listing = self.get_listing(id).await?;
        let owner = self.users.get_by_id(listing.owner_id).await?;
        let reservations = self.reservations.find_by_listing(id).await?;
        let disabled_dates = disabled_dates(&reservations);
        tracing::debug!(
            listing_id = %id,
            reservations = reservations.len(),
            disabled = disabled_dates.len(),
            "listing detail assembled"
        );

        Ok(ListingDetail {
            supports_reservation: listing.supports_reservation(),
            listing,
            owner,
            reservations,
            disabled_dates,
        })
    }

    /// Price a proposed stay without keeping any state.
    ///
    /// The quote starts at the nightly price, so a same-day range returns the
    /// nightly price unchanged.
    ///
    /// # Errors
    ///
    /// - [`HearthError::Validation`] when the range fails
    ///   [`DateInterval::check_stay`]
    /// - [`HearthError::NotFound`] if the listing does not exist
    pub async fn quote(&self, id: ListingId, range: DateInterval) -> Result<Quote, HearthError> {
        range.check_stay()?;
        let listing = self.get_listing(id).await?;
        let mut quote = PriceQuote::seeded(listing.price);
        quote.update(&range, listing.price);
        Ok(Quote {
            nights: range.nights(),
            nightly_price: listing.price,
            total_price: quote.total_price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{
        InMemoryListingRepo, InMemoryReservationRepo, InMemoryUserRepo, RecordingPublisher,
    };
    use chrono::NaiveDate;
    use hearth_domain::error::ValidationError;
    use hearth_domain::reservation::NewReservation;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    type Service = ListingService<
        Arc<InMemoryListingRepo>,
        Arc<InMemoryReservationRepo>,
        Arc<InMemoryUserRepo>,
        Arc<RecordingPublisher>,
    >;

    struct Fixture {
        svc: Service,
        reservations: Arc<InMemoryReservationRepo>,
        publisher: Arc<RecordingPublisher>,
        owner: User,
    }

    async fn fixture() -> Fixture {
        let users = Arc::new(InMemoryUserRepo::default());
        let owner = users
            .create(User::new("Host", "host@example.com").unwrap())
            .await
            .unwrap();
        let reservations = Arc::new(InMemoryReservationRepo::default());
        let publisher = Arc::new(RecordingPublisher::default());
        let svc = ListingService::new(
            Arc::new(InMemoryListingRepo::default()),
            Arc::clone(&reservations),
            users,
            Arc::clone(&publisher),
        );
        Fixture {
            svc,
            reservations,
            publisher,
            owner,
        }
    }

    fn listing(owner: &User, category: Category) -> Listing {
        Listing::builder()
            .owner_id(owner.id)
            .title("Cabin")
            .price(dec!(100))
            .category(category)
            .build()
            .unwrap()
    }

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    #[tokio::test]
    async fn should_create_listing_and_publish_event() {
        let fx = fixture().await;
        let created = fx
            .svc
            .create_listing(listing(&fx.owner, Category::Airbnb))
            .await
            .unwrap();

        let events = fx.publisher.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, EventType::ListingCreated);
        assert_eq!(events[0].listing_id, created.id);
    }

    #[tokio::test]
    async fn should_reject_listing_with_unknown_owner() {
        let fx = fixture().await;
        let stranger = User::new("Nobody", "nobody@example.com").unwrap();
        let result = fx.svc.create_listing(listing(&stranger, Category::Rent)).await;
        assert!(matches!(result, Err(HearthError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_filter_listings_by_category() {
        let fx = fixture().await;
        fx.svc
            .create_listing(listing(&fx.owner, Category::Airbnb))
            .await
            .unwrap();
        fx.svc
            .create_listing(listing(&fx.owner, Category::Sale))
            .await
            .unwrap();

        assert_eq!(fx.svc.list_listings(None).await.unwrap().len(), 2);
        let sales = fx.svc.list_listings(Some(Category::Sale)).await.unwrap();
        assert_eq!(sales.len(), 1);
        assert!(
            fx.svc
                .list_listings(Some(Category::Land))
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn should_build_detail_with_disabled_dates() {
        let fx = fixture().await;
        let created = fx
            .svc
            .create_listing(listing(&fx.owner, Category::Airbnb))
            .await
            .unwrap();
        for (start, end) in [(day(1, 10), day(1, 12)), (day(1, 11), day(1, 13))] {
            let request = NewReservation {
                listing_id: created.id,
                user_id: fx.owner.id,
                range: DateInterval::new(start, end).unwrap(),
                total_price: dec!(200),
            };
            fx.reservations
                .create(Reservation::from_request(&request))
                .await
                .unwrap();
        }

        let detail = fx.svc.listing_detail(created.id).await.unwrap();
        assert!(detail.supports_reservation);
        assert_eq!(detail.owner.unwrap().id, fx.owner.id);
        assert_eq!(detail.reservations.len(), 2);
        assert_eq!(detail.disabled_dates.len(), 4);
    }

    #[tokio::test]
    async fn should_quote_nights_times_price() {
        let fx = fixture().await;
        let created = fx
            .svc
            .create_listing(listing(&fx.owner, Category::Airbnb))
            .await
            .unwrap();

        let quote = fx
            .svc
            .quote(created.id, DateInterval::new(day(3, 1), day(3, 4)).unwrap())
            .await
            .unwrap();
        assert_eq!(quote.nights, 3);
        assert_eq!(quote.total_price, dec!(300));
    }

    #[tokio::test]
    async fn should_quote_nightly_price_for_same_day_range() {
        let fx = fixture().await;
        let created = fx
            .svc
            .create_listing(listing(&fx.owner, Category::Airbnb))
            .await
            .unwrap();

        let quote = fx
            .svc
            .quote(created.id, DateInterval::single_day(day(3, 1)))
            .await
            .unwrap();
        assert_eq!(quote.nights, 0);
        assert_eq!(quote.total_price, dec!(100));
    }

    #[tokio::test]
    async fn should_reject_quote_longer_than_the_night_limit() {
        let fx = fixture().await;
        let created = fx
            .svc
            .create_listing(listing(&fx.owner, Category::Airbnb))
            .await
            .unwrap();

        let range = DateInterval::new(
            NaiveDate::from_ymd_opt(1, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(9999, 12, 31).unwrap(),
        )
        .unwrap();
        let result = fx.svc.quote(created.id, range).await;
        assert!(matches!(
            result,
            Err(HearthError::Validation(ValidationError::RangeTooLong { .. }))
        ));
    }

    #[tokio::test]
    async fn should_return_not_found_when_deleting_missing_listing() {
        let fx = fixture().await;
        let result = fx.svc.delete_listing(ListingId::new()).await;
        assert!(matches!(result, Err(HearthError::NotFound(_))));
    }
}
