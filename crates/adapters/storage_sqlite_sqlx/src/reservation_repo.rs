//! `SQLite` implementation of [`ReservationRepository`].

use std::future::Future;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use hearth_app::ports::ReservationRepository;
use hearth_domain::error::HearthError;
use hearth_domain::id::{ListingId, ReservationId, UserId};
use hearth_domain::reservation::Reservation;

use crate::error::{StorageError, decode};

struct Wrapper(Reservation);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let listing_id: String = row.try_get("listing_id")?;
        let user_id: String = row.try_get("user_id")?;
        let start_date: String = row.try_get("start_date")?;
        let end_date: String = row.try_get("end_date")?;
        let total_price: String = row.try_get("total_price")?;
        let created_at: String = row.try_get("created_at")?;

        Ok(Self(Reservation {
            id: ReservationId::from_str(&id).map_err(decode)?,
            listing_id: ListingId::from_str(&listing_id).map_err(decode)?,
            user_id: UserId::from_str(&user_id).map_err(decode)?,
            start_date: NaiveDate::from_str(&start_date).map_err(decode)?,
            end_date: NaiveDate::from_str(&end_date).map_err(decode)?,
            total_price: Decimal::from_str(&total_price).map_err(decode)?,
            created_at: chrono::DateTime::parse_from_rfc3339(&created_at)
                .map_err(decode)?
                .to_utc(),
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO reservations (id, listing_id, user_id, start_date, end_date, total_price, created_at)
    VALUES (?, ?, ?, ?, ?, ?, ?)
";

const SELECT_BY_ID: &str = "SELECT * FROM reservations WHERE id = ?";
// Stored days are four-digit-year ISO-8601 strings, so text order is date order.
const SELECT_BY_LISTING: &str =
    "SELECT * FROM reservations WHERE listing_id = ? ORDER BY start_date, created_at";
const SELECT_BY_USER: &str =
    "SELECT * FROM reservations WHERE user_id = ? ORDER BY start_date, created_at";
const DELETE_BY_ID: &str = "DELETE FROM reservations WHERE id = ?";

/// `SQLite`-backed reservation repository.
pub struct SqliteReservationRepository {
    pool: SqlitePool,
}

impl SqliteReservationRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn select_many(
        &self,
        query: &'static str,
        key: String,
    ) -> impl Future<Output = Result<Vec<Reservation>, HearthError>> + Send + use<> {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(query)
                .bind(key)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }
}

impl ReservationRepository for SqliteReservationRepository {
    fn create(
        &self,
        reservation: Reservation,
    ) -> impl Future<Output = Result<Reservation, HearthError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(reservation.id.to_string())
                .bind(reservation.listing_id.to_string())
                .bind(reservation.user_id.to_string())
                .bind(reservation.start_date.to_string())
                .bind(reservation.end_date.to_string())
                .bind(reservation.total_price.to_string())
                .bind(reservation.created_at.to_rfc3339())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(reservation)
        }
    }

    fn get_by_id(
        &self,
        id: ReservationId,
    ) -> impl Future<Output = Result<Option<Reservation>, HearthError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|w| w.0))
        }
    }

    fn find_by_listing(
        &self,
        listing_id: ListingId,
    ) -> impl Future<Output = Result<Vec<Reservation>, HearthError>> + Send {
        self.select_many(SELECT_BY_LISTING, listing_id.to_string())
    }

    fn find_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<Reservation>, HearthError>> + Send {
        self.select_many(SELECT_BY_USER, user_id.to_string())
    }

    fn delete(&self, id: ReservationId) -> impl Future<Output = Result<(), HearthError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(DELETE_BY_ID)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }
}
