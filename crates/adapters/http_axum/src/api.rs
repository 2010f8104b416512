//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod listings;
#[allow(clippy::missing_errors_doc)]
pub mod reservations;
#[allow(clippy::missing_errors_doc)]
pub mod users;

use axum::Router;
use axum::routing::{get, post};

use hearth_app::ports::{EventPublisher, ListingRepository, ReservationRepository, UserRepository};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<LR, RR, UR, EP>() -> Router<AppState<LR, RR, UR, EP>>
where
    LR: ListingRepository + Send + Sync + 'static,
    RR: ReservationRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    Router::new()
        // Listings
        .route(
            "/listings",
            get(listings::list::<LR, RR, UR, EP>).post(listings::create::<LR, RR, UR, EP>),
        )
        .route(
            "/listings/{id}",
            get(listings::get::<LR, RR, UR, EP>).delete(listings::delete::<LR, RR, UR, EP>),
        )
        .route(
            "/listings/{id}/detail",
            get(listings::detail::<LR, RR, UR, EP>),
        )
        .route("/listings/{id}/quote", get(listings::quote::<LR, RR, UR, EP>))
        // Reservations
        .route(
            "/reservations",
            post(reservations::create::<LR, RR, UR, EP>),
        )
        .route(
            "/reservations/{id}",
            get(reservations::get::<LR, RR, UR, EP>)
                .delete(reservations::delete::<LR, RR, UR, EP>),
        )
        // Users
        .route("/users", post(users::create::<LR, RR, UR, EP>))
        .route("/users/{id}", get(users::get::<LR, RR, UR, EP>))
        .route(
            "/users/{id}/reservations",
            get(users::reservations::<LR, RR, UR, EP>),
        )
}
