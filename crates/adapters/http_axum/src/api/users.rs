//! JSON REST handlers for users.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use hearth_app::ports::{EventPublisher, ListingRepository, ReservationRepository, UserRepository};
use hearth_domain::id::UserId;
use hearth_domain::reservation::Reservation;
use hearth_domain::user::User;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

pub enum GetResponse {
    Ok(Json<User>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

pub enum CreateResponse {
    Created(Json<User>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

pub enum ReservationsResponse {
    Ok(Json<Vec<Reservation>>),
}

impl IntoResponse for ReservationsResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /api/users`
pub async fn create<LR, RR, UR, EP>(
    State(state): State<AppState<LR, RR, UR, EP>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<CreateResponse, ApiError>
where
    LR: ListingRepository + Send + Sync + 'static,
    RR: ReservationRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    let user = User::new(req.name, req.email)?;
    let created = state.user_service.create_user(user).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `GET /api/users/{id}`
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
    let user = state.user_service.get_user(UserId::parse(&id)?).await?;
    Ok(GetResponse::Ok(Json(user)))
}

/// `GET /api/users/{id}/reservations`, the user's trips.
pub async fn reservations<LR, RR, UR, EP>(
    State(state): State<AppState<LR, RR, UR, EP>>,
    Path(id): Path<String>,
) -> Result<ReservationsResponse, ApiError>
where
    LR: ListingRepository + Send + Sync + 'static,
    RR: ReservationRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    let user = state.user_service.get_user(UserId::parse(&id)?).await?;
    let trips = state.reservation_service.list_for_user(user.id).await?;
    Ok(ReservationsResponse::Ok(Json(trips)))
}
