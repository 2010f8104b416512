//! `SQLite` implementation of [`ListingRepository`].

use std::future::Future;
use std::str::FromStr;

use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use hearth_app::ports::ListingRepository;
use hearth_domain::error::HearthError;
use hearth_domain::id::{ListingId, UserId};
use hearth_domain::listing::{Category, Listing};

use crate::error::{StorageError, decode};

/// Wrapper for converting database rows into domain types without polluting
/// domain structs with database concerns.
struct Wrapper(Listing);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Listing> {
        value.map(|w| w.0)
    }

    fn all(rows: Vec<Self>) -> Vec<Listing> {
        rows.into_iter().map(|w| w.0).collect()
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let owner_id: String = row.try_get("owner_id")?;
        let category: String = row.try_get("category")?;
        let price: String = row.try_get("price")?;
        let created_at: String = row.try_get("created_at")?;

        let id = ListingId::from_str(&id).map_err(decode)?;
        let owner_id = UserId::from_str(&owner_id).map_err(decode)?;
        let category = Category::from_str(&category).map_err(decode)?;
        let price = Decimal::from_str(&price).map_err(decode)?;
        let created_at = chrono::DateTime::parse_from_rfc3339(&created_at)
            .map_err(decode)?
            .to_utc();

        Ok(Self(Listing {
            id,
            owner_id,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            image_src: row.try_get("image_src")?,
            category,
            address: row.try_get("address")?,
            price,
            created_at,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO listings (id, owner_id, title, description, image_src, category, address, price, created_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
";

const SELECT_BY_ID: &str = "SELECT * FROM listings WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM listings ORDER BY created_at DESC";
const SELECT_BY_CATEGORY: &str =
    "SELECT * FROM listings WHERE category = ? ORDER BY created_at DESC";
const DELETE_BY_ID: &str = "DELETE FROM listings WHERE id = ?";

/// `SQLite`-backed listing repository.
pub struct SqliteListingRepository {
    pool: SqlitePool,
}

impl SqliteListingRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ListingRepository for SqliteListingRepository {
    fn create(&self, listing: Listing) -> impl Future<Output = Result<Listing, HearthError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(listing.id.to_string())
                .bind(listing.owner_id.to_string())
                .bind(&listing.title)
                .bind(&listing.description)
                .bind(&listing.image_src)
                .bind(listing.category.to_string())
                .bind(&listing.address)
                .bind(listing.price.to_string())
                .bind(listing.created_at.to_rfc3339())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(listing)
        }
    }

    fn get_by_id(
        &self,
        id: ListingId,
    ) -> impl Future<Output = Result<Option<Listing>, HearthError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Listing>, HearthError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::all(rows))
        }
    }

    fn find_by_category(
        &self,
        category: Category,
    ) -> impl Future<Output = Result<Vec<Listing>, HearthError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_CATEGORY)
                .bind(category.to_string())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::all(rows))
        }
    }

    fn delete(&self, id: ListingId) -> impl Future<Output = Result<(), HearthError>> + Send {
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
