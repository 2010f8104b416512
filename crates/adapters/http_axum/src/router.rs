//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use hearth_app::ports::{EventPublisher, ListingRepository, ReservationRepository, UserRepository};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// API routes live under `/api`. Includes a [`TraceLayer`] that logs each
/// HTTP request/response at the `DEBUG` level using the `tracing` ecosystem.
pub fn build<LR, RR, UR, EP>(state: AppState<LR, RR, UR, EP>) -> Router
where
    LR: ListingRepository + Send + Sync + 'static,
    RR: ReservationRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use hearth_app::services::listing_service::ListingService;
    use hearth_app::services::reservation_service::ReservationService;
    use hearth_app::services::user_service::UserService;
    use hearth_domain::error::HearthError;
    use hearth_domain::event::Event;
    use hearth_domain::id::{ListingId, ReservationId, UserId};
    use hearth_domain::listing::{Category, Listing};
    use hearth_domain::reservation::Reservation;
    use hearth_domain::user::User;
    use tower::ServiceExt;

    struct StubListingRepo;
    struct StubReservationRepo;
    struct StubUserRepo;
    struct StubPublisher;

    impl ListingRepository for StubListingRepo {
        async fn create(&self, listing: Listing) -> Result<Listing, HearthError> {
            Ok(listing)
        }
        async fn get_by_id(&self, _id: ListingId) -> Result<Option<Listing>, HearthError> {
            Ok(None)
        }
        async fn get_all(&self) -> Result<Vec<Listing>, HearthError> {
            Ok(vec![])
        }
        async fn find_by_category(&self, _category: Category) -> Result<Vec<Listing>, HearthError> {
            Ok(vec![])
        }
        async fn delete(&self, _id: ListingId) -> Result<(), HearthError> {
            Ok(())
        }
    }

    impl ReservationRepository for StubReservationRepo {
        async fn create(&self, reservation: Reservation) -> Result<Reservation, HearthError> {
            Ok(reservation)
        }
        async fn get_by_id(&self, _id: ReservationId) -> Result<Option<Reservation>, HearthError> {
            Ok(None)
        }
        async fn find_by_listing(
            &self,
            _listing_id: ListingId,
        ) -> Result<Vec<Reservation>, HearthError> {
            Ok(vec![])
        }
        async fn find_by_user(&self, _user_id: UserId) -> Result<Vec<Reservation>, HearthError> {
            Ok(vec![])
        }
        async fn delete(&self, _id: ReservationId) -> Result<(), HearthError> {
            Ok(())
        }
    }

    impl UserRepository for StubUserRepo {
        async fn create(&self, user: User) -> Result<User, HearthError> {
            Ok(user)
        }
        async fn get_by_id(&self, _id: UserId) -> Result<Option<User>, HearthError> {
            Ok(None)
        }
    }

    impl EventPublisher for StubPublisher {
        async fn publish(&self, _event: Event) -> Result<(), HearthError> {
            Ok(())
        }
    }

    fn test_app() -> Router {
        build(AppState::new(
            ListingService::new(StubListingRepo, StubReservationRepo, StubUserRepo, StubPublisher),
            ReservationService::new(
                StubListingRepo,
                StubReservationRepo,
                StubUserRepo,
                StubPublisher,
            ),
            UserService::new(StubUserRepo),
        ))
    }

    async fn send(request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = test_app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let response = test_app().oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_return_empty_state_without_reset_when_unfiltered() {
        let (status, json) = send(get("/api/listings")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["listings"], serde_json::json!([]));
        assert_eq!(json["empty_state"]["title"], "No exact matches");
        assert_eq!(json["empty_state"]["show_reset"], false);
    }

    #[tokio::test]
    async fn should_offer_reset_when_category_filter_matches_nothing() {
        let (status, json) = send(get("/api/listings?category=land")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["empty_state"]["show_reset"], true);
    }

    #[tokio::test]
    async fn should_reject_unknown_category() {
        let (status, json) = send(get("/api/listings?category=castle")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("castle"));
    }

    #[tokio::test]
    async fn should_return_bad_request_for_malformed_id() {
        let (status, _) = send(get("/api/listings/not-a-uuid")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_return_not_found_for_missing_listing_detail() {
        let uri = format!("/api/listings/{}/detail", ListingId::new());
        let (status, json) = send(get(&uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(json["error"].as_str().unwrap().contains("not found"));
    }

    #[tokio::test]
    async fn should_reject_inverted_quote_range() {
        let uri = format!(
            "/api/listings/{}/quote?start_date=2024-01-12&end_date=2024-01-10",
            ListingId::new()
        );
        let (status, _) = send(get(&uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_require_authentication_to_reserve() {
        let body = serde_json::json!({
            "listing_id": ListingId::new().to_string(),
            "start_date": "2024-01-10",
            "end_date": "2024-01-12",
            "total_price": 200,
        });
        let request = Request::builder()
            .method("POST")
            .uri("/api/reservations")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let (status, json) = send(request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"], "authentication required");
    }

    #[tokio::test]
    async fn should_return_not_found_when_reserving_missing_listing() {
        let body = serde_json::json!({
            "listingId": ListingId::new().to_string(),
            "startDate": "2024-01-10",
            "endDate": "2024-01-12",
            "totalPrice": 200,
        });
        let request = Request::builder()
            .method("POST")
            .uri("/api/reservations")
            .header("content-type", "application/json")
            .header("x-user-id", UserId::new().to_string())
            .body(Body::from(body.to_string()))
            .unwrap();

        let (status, _) = send(request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
