//! # hearth-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a JSON API for listings, reservations and users
//!   (`/api/listings`, `/api/reservations`, `/api/users`, …)
//! - Expose the listing page's read model: detail with disabled dates and
//!   stateless price quotes
//! - Identify the current user from the `x-user-id` request header
//! - Map application results and errors into HTTP responses
//!
//! ## Dependency rule
//! Depends on `hearth-app` (for port traits and services) and `hearth-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod extract;
pub mod router;
pub mod state;
