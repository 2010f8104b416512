//! JSON REST handlers for reservations.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use hearth_app::ports::{EventPublisher, ListingRepository, ReservationRepository, UserRepository};
use hearth_domain::date_interval::DateInterval;
use hearth_domain::id::{ListingId, ReservationId};
use hearth_domain::reservation::{NewReservation, Reservation};

use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::state::AppState;

/// Request body for booking a stay. Field names also accept camelCase.
#[derive(Deserialize)]
pub struct CreateReservationRequest {
    #[serde(alias = "listingId")]
    pub listing_id: String,
    #[serde(alias = "startDate")]
    pub start_date: NaiveDate,
    #[serde(alias = "endDate")]
    pub end_date: NaiveDate,
    #[serde(alias = "totalPrice")]
    pub total_price: Decimal,
}

pub enum GetResponse {
    Ok(Json<Reservation>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

pub enum CreateResponse {
    Created(Json<Reservation>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `POST /api/reservations`
pub async fn create<LR, RR, UR, EP>(
    State(state): State<AppState<LR, RR, UR, EP>>,
    CurrentUser(user_id): CurrentUser,
    Json(req): Json<CreateReservationRequest>,
) -> Result<CreateResponse, ApiError>
where
    LR: ListingRepository + Send + Sync + 'static,
    RR: ReservationRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    let request = NewReservation {
        listing_id: ListingId::parse(&req.listing_id)?,
        user_id,
        range: DateInterval::new(req.start_date, req.end_date)?,
        total_price: req.total_price,
    };
    let created = state
        .reservation_service
        .create_reservation(request)
        .await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `GET /api/reservations/{id}`
pub async fn get<LR, RR, UR, EP>(
    State(state): State<AppState<LR, RR, UR, EP>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    LR: ListingRepository + Send + Sync + 'static,
    RR: ReservationRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    let reservation = state
        .reservation_service
        .get_reservation(ReservationId::parse(&id)?)
        .await?;
    Ok(GetResponse::Ok(Json(reservation)))
}

/// `DELETE /api/reservations/{id}`
pub async fn delete<LR, RR, UR, EP>(
    State(state): State<AppState<LR, RR, UR, EP>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    LR: ListingRepository + Send + Sync + 'static,
    RR: ReservationRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    state
        .reservation_service
        .cancel_reservation(ReservationId::parse(&id)?)
        .await?;
    Ok(DeleteResponse::NoContent)
}
