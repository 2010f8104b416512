//! JSON REST handlers for listings.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use hearth_app::ports::{EventPublisher, ListingRepository, ReservationRepository, UserRepository};
use hearth_app::services::listing_service::{ListingDetail, Quote};
use hearth_domain::date_interval::DateInterval;
use hearth_domain::id::ListingId;
use hearth_domain::listing::{Category, Listing};

use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::state::AppState;

/// Request body for creating a listing. The owner is the current user.
#[derive(Deserialize)]
pub struct CreateListingRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "imageSrc")]
    pub image_src: String,
    pub category: String,
    #[serde(default)]
    pub address: String,
    pub price: Decimal,
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
}

#[derive(Deserialize)]
pub struct QuoteQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Placeholder shown when no listing matches the current filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    pub title: String,
    pub subtitle: String,
    /// Whether a "remove all filters" action should be offered.
    pub show_reset: bool,
}

impl EmptyState {
    pub const DEFAULT_TITLE: &'static str = "No exact matches";
    pub const DEFAULT_SUBTITLE: &'static str = "Try changing or removing some of your filters";

    #[must_use]
    pub fn new(show_reset: bool) -> Self {
        Self {
            title: Self::DEFAULT_TITLE.to_string(),
            subtitle: Self::DEFAULT_SUBTITLE.to_string(),
            show_reset,
        }
    }
}

#[derive(Serialize)]
pub struct ListingsPage {
    pub listings: Vec<Listing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_state: Option<EmptyState>,
}

pub enum ListResponse {
    Ok(Json<ListingsPage>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

pub enum GetResponse {
    Ok(Json<Listing>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

pub enum CreateResponse {
    Created(Json<Listing>),
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

pub enum DetailResponse {
    Ok(Json<ListingDetail>),
}

impl IntoResponse for DetailResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

pub enum QuoteResponse {
    Ok(Json<Quote>),
}

impl IntoResponse for QuoteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/listings[?category=]`
pub async fn list<LR, RR, UR, EP>(
    State(state): State<AppState<LR, RR, UR, EP>>,
    Query(query): Query<ListQuery>,
) -> Result<ListResponse, ApiError>
where
    LR: ListingRepository + Send + Sync + 'static,
    RR: ReservationRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    let category = query
        .category
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(Category::from_str)
        .transpose()?;

    let listings = state.listing_service.list_listings(category).await?;
    let empty_state = listings
        .is_empty()
        .then(|| EmptyState::new(category.is_some()));
    Ok(ListResponse::Ok(Json(ListingsPage {
        listings,
        empty_state,
    })))
}

/// `POST /api/listings`
pub async fn create<LR, RR, UR, EP>(
    State(state): State<AppState<LR, RR, UR, EP>>,
    CurrentUser(owner_id): CurrentUser,
    Json(req): Json<CreateListingRequest>,
) -> Result<CreateResponse, ApiError>
where
    LR: ListingRepository + Send + Sync + 'static,
    RR: ReservationRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    let listing = Listing::builder()
        .owner_id(owner_id)
        .title(req.title)
        .description(req.description)
        .image_src(req.image_src)
        .category(Category::from_str(&req.category)?)
        .address(req.address)
        .price(req.price)
        .build()?;

    let created = state.listing_service.create_listing(listing).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `GET /api/listings/{id}`
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
    let listing = state
        .listing_service
        .get_listing(ListingId::parse(&id)?)
        .await?;
    Ok(GetResponse::Ok(Json(listing)))
}

/// `DELETE /api/listings/{id}`
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
        .listing_service
        .delete_listing(ListingId::parse(&id)?)
        .await?;
    Ok(DeleteResponse::NoContent)
}

/// `GET /api/listings/{id}/detail`
pub async fn detail<LR, RR, UR, EP>(
    State(state): State<AppState<LR, RR, UR, EP>>,
    Path(id): Path<String>,
) -> Result<DetailResponse, ApiError>
where
    LR: ListingRepository + Send + Sync + 'static,
    RR: ReservationRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    let detail = state
        .listing_service
        .listing_detail(ListingId::parse(&id)?)
        .await?;
    Ok(DetailResponse::Ok(Json(detail)))
}

/// `GET /api/listings/{id}/quote?start_date=&end_date=`
pub async fn quote<LR, RR, UR, EP>(
    State(state): State<AppState<LR, RR, UR, EP>>,
    Path(id): Path<String>,
    Query(query): Query<QuoteQuery>,
) -> Result<QuoteResponse, ApiError>
where
    LR: ListingRepository + Send + Sync + 'static,
    RR: ReservationRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    let id = ListingId::parse(&id)?;
    let range = DateInterval::new(query.start_date, query.end_date)?;
    let quote = state.listing_service.quote(id, range).await?;
    Ok(QuoteResponse::Ok(Json(quote)))
}
