//! # hearth-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `ListingRepository`, `ReservationRepository`, `UserRepository` — persistence
//!   - `EventPublisher` — broadcast lifecycle events
//!   - `ReservationGateway` — the booking session's path to the reservation API
//! - Define **driving/inbound ports** as use-case structs:
//!   - `ListingService` — create, list, detail view with availability, quote
//!   - `ReservationService` — create (with conflict checks), list, cancel
//!   - `UserService` — register, get
//!   - `BookingSession` — selection, price quote and the submit state machine
//! - Provide **in-process infrastructure** (event bus) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `hearth-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod booking;
pub mod event_bus;
pub mod ports;
pub mod services;
