//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`HearthError`]
//! via `#[from]`. Adapter-specific failures travel as boxed sources inside
//! [`HearthError::Storage`].

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Top-level error shared by the domain, application and adapter layers.
#[derive(Debug, thiserror::Error)]
pub enum HearthError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The requested record does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The request collides with existing state.
    #[error("conflict")]
    Conflict(#[from] ConflictError),

    /// A persistence or transport layer failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A date interval ends before it starts.
    #[error("invalid date range: {end} is before {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("title must not be empty")]
    EmptyTitle,

    #[error("name must not be empty")]
    EmptyName,

    #[error("email address is not valid")]
    InvalidEmail,

    /// A stay spans more nights than a single reservation may hold.
    #[error("stay of {nights} nights exceeds the {max} night limit")]
    RangeTooLong { nights: u32, max: u32 },

    /// A date falls outside the four-digit-year calendar.
    #[error("date {0} is out of range")]
    DateOutOfRange(NaiveDate),

    /// Nightly prices and reservation totals must be strictly positive.
    #[error("price must be greater than zero")]
    NonPositivePrice,

    #[error("price must not exceed {max}")]
    PriceTooHigh { max: Decimal },

    /// The listing's category does not accept reservations.
    #[error("listing category {0} does not accept reservations")]
    ReservationNotSupported(String),

    #[error("unknown listing category: {0}")]
    UnknownCategory(String),

    /// An identifier could not be parsed.
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

/// A lookup by identifier found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// State conflicts detected by the application layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConflictError {
    /// The proposed stay covers at least one day that is already booked.
    #[error("dates already reserved starting {first}")]
    DatesUnavailable { first: NaiveDate },
}
