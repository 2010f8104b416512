//! # hearth-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `hearth-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `hearth-app` (for port traits) and `hearth-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod error;
mod listing_repo;
mod pool;
mod reservation_repo;
mod user_repo;

pub use error::StorageError;
pub use listing_repo::SqliteListingRepository;
pub use pool::{Config, Database};
pub use reservation_repo::SqliteReservationRepository;
pub use user_repo::SqliteUserRepository;
