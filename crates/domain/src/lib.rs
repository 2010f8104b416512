//! # hearth-domain
//!
//! Pure domain model for the hearth property-rental system.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps, money
//! - Define **Listings** (rentable properties with a nightly price and a category)
//! - Define **Users** (guests and hosts)
//! - Define **Reservations** (booked date intervals against a listing)
//! - Compute **availability** (the calendar days blocked by existing reservations)
//! - Compute **pricing** (the total for a proposed stay)
//! - Define **Events** (listing and reservation lifecycle records)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod money;
pub mod time;

pub mod availability;
pub mod date_interval;
pub mod event;
pub mod listing;
pub mod pricing;
pub mod reservation;
pub mod user;
