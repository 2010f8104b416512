//! Shared application state for axum handlers.

use std::sync::Arc;

use hearth_app::ports::{EventPublisher, ListingRepository, ReservationRepository, UserRepository};
use hearth_app::services::listing_service::ListingService;
use hearth_app::services::reservation_service::ReservationService;
use hearth_app::services::user_service::UserService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository types and event publisher to avoid dynamic
/// dispatch. `Clone` is implemented manually so the underlying types
/// themselves do not need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<LR, RR, UR, EP> {
    pub listing_service: Arc<ListingService<LR, RR, UR, EP>>,
    pub reservation_service: Arc<ReservationService<LR, RR, UR, EP>>,
    pub user_service: Arc<UserService<UR>>,
}

impl<LR, RR, UR, EP> Clone for AppState<LR, RR, UR, EP> {
    fn clone(&self) -> Self {
        Self {
            listing_service: Arc::clone(&self.listing_service),
            reservation_service: Arc::clone(&self.reservation_service),
            user_service: Arc::clone(&self.user_service),
        }
    }
}

impl<LR, RR, UR, EP> AppState<LR, RR, UR, EP>
where
    LR: ListingRepository + Send + Sync + 'static,
    RR: ReservationRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    pub fn new(
        listing_service: ListingService<LR, RR, UR, EP>,
        reservation_service: ReservationService<LR, RR, UR, EP>,
        user_service: UserService<UR>,
    ) -> Self {
        Self {
            listing_service: Arc::new(listing_service),
            reservation_service: Arc::new(reservation_service),
            user_service: Arc::new(user_service),
        }
    }
}
