//! Booking session: the state behind a listing page's reservation widget.
//!
//! A session holds the guest's in-progress date selection, the price quote
//! derived from it, the listing's current reservations and the days they
//! block, and the submit state machine:
//!
//! ```text
//! Idle ──submit()──▶ Submitting ──ok──▶ Idle (selection reset, reservations refreshed)
//!                         │
//!                         └──err──▶ Idle (selection kept)
//! ```
//!
//! Submitting without a current user never leaves `Idle`; the caller is
//! expected to show a login prompt instead. A second `submit()` while one is
//! in flight is a no-op. The inner state sits behind a `std::sync::Mutex`
//! that is never held across an `.await`.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use hearth_domain::availability::{DisabledDates, disabled_dates};
use hearth_domain::date_interval::DateInterval;
use hearth_domain::error::{HearthError, ValidationError};
use hearth_domain::event::Event;
use hearth_domain::id::UserId;
use hearth_domain::listing::Listing;
use hearth_domain::pricing::PriceQuote;
use hearth_domain::reservation::{NewReservation, Reservation};
use hearth_domain::time::today;

use crate::ports::ReservationGateway;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    Idle,
    Submitting,
}

/// Successful results of [`BookingSession::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The reservation was accepted.
    Reserved,
    /// Another submission was already in flight; nothing was sent.
    AlreadySubmitting,
}

/// Failures of [`BookingSession::submit`].
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    /// No user is signed in. Recover by prompting for login.
    #[error("authentication required")]
    AuthenticationRequired,

    /// The reservation request did not succeed. Not retried.
    #[error("something went wrong")]
    Failed(#[source] HearthError),
}

struct SessionState {
    status: SubmitStatus,
    current_user: Option<UserId>,
    selection: DateInterval,
    quote: PriceQuote,
    reservations: Vec<Reservation>,
    disabled: DisabledDates,
}

impl SessionState {
    fn replace_reservations(&mut self, reservations: Vec<Reservation>) {
        self.disabled = disabled_dates(&reservations);
        self.reservations = reservations;
    }
}

/// Resets the session to `Idle` however the in-flight submit ends, including
/// when its future is dropped.
struct SubmittingGuard<'a> {
    state: &'a Mutex<SessionState>,
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        lock(self.state).status = SubmitStatus::Idle;
    }
}

fn lock(state: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Reservation widget state for a single listing.
pub struct BookingSession<G> {
    gateway: G,
    listing: Listing,
    today: NaiveDate,
    state: Mutex<SessionState>,
}

impl<G: ReservationGateway> BookingSession<G> {
    /// Open a session on `listing` with its known `reservations`.
    ///
    /// The selection starts as the same-day range on today's date and the
    /// quote starts at the listing's nightly price.
    pub fn new(
        gateway: G,
        listing: Listing,
        reservations: Vec<Reservation>,
        current_user: Option<UserId>,
    ) -> Self {
        let today = today();
        let mut state = SessionState {
            status: SubmitStatus::Idle,
            current_user,
            selection: DateInterval::single_day(today),
            quote: PriceQuote::seeded(listing.price),
            reservations: Vec::new(),
            disabled: DisabledDates::default(),
        };
        state.replace_reservations(reservations);
        Self {
            gateway,
            listing,
            today,
            state: Mutex::new(state),
        }
    }

    /// Pin the "today" used for the default selection.
    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        lock(&self.state).selection = DateInterval::single_day(today);
        self
    }

    #[must_use]
    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    /// Record the signed-in user, e.g. after the login prompt completes.
    pub fn set_current_user(&self, user: Option<UserId>) {
        lock(&self.state).current_user = user;
    }

    #[must_use]
    pub fn selection(&self) -> DateInterval {
        lock(&self.state).selection
    }

    #[must_use]
    pub fn total_price(&self) -> Decimal {
        lock(&self.state).quote.total_price
    }

    #[must_use]
    pub fn disabled_dates(&self) -> DisabledDates {
        lock(&self.state).disabled.clone()
    }

    #[must_use]
    pub fn reservations(&self) -> Vec<Reservation> {
        lock(&self.state).reservations.clone()
    }

    #[must_use]
    pub fn status(&self) -> SubmitStatus {
        lock(&self.state).status
    }

    /// Whether the reserve button should be clickable.
    #[must_use]
    pub fn is_submit_enabled(&self) -> bool {
        self.listing.supports_reservation() && self.status() == SubmitStatus::Idle
    }

    /// Change the selected range and return the (possibly unchanged) total.
    pub fn select(&self, range: DateInterval) -> Decimal {
        let mut state = lock(&self.state);
        state.selection = range;
        if state.quote.update(&range, self.listing.price) {
            tracing::debug!(
                listing_id = %self.listing.id,
                nights = range.nights(),
                total = %state.quote.total_price,
                "quote updated"
            );
        }
        state.quote.total_price
    }

    /// Send the current selection as a reservation request.
    ///
    /// # Errors
    ///
    /// - [`SubmissionError::AuthenticationRequired`] when nobody is signed in;
    ///   no request is made.
    /// - [`SubmissionError::Failed`] when the listing does not take
    ///   reservations or the request fails.
    pub async fn submit(&self) -> Result<SubmitOutcome, SubmissionError> {
        let request = {
            let mut state = lock(&self.state);
            let Some(user_id) = state.current_user else {
                tracing::debug!(listing_id = %self.listing.id, "submit without user, login required");
                return Err(SubmissionError::AuthenticationRequired);
            };
            if state.status == SubmitStatus::Submitting {
                tracing::debug!(listing_id = %self.listing.id, "submit ignored, already submitting");
                return Ok(SubmitOutcome::AlreadySubmitting);
            }
            if !self.listing.supports_reservation() {
                return Err(SubmissionError::Failed(
                    ValidationError::ReservationNotSupported(self.listing.category.to_string())
                        .into(),
                ));
            }
            state.status = SubmitStatus::Submitting;
            NewReservation {
                listing_id: self.listing.id,
                user_id,
                range: state.selection,
                total_price: state.quote.total_price,
            }
        };
        let _submitting = SubmittingGuard { state: &self.state };

        if let Err(err) = self.gateway.create_reservation(request).await {
            tracing::warn!(listing_id = %self.listing.id, error = %err, "reservation request failed");
            return Err(SubmissionError::Failed(err));
        }
        tracing::info!(
            listing_id = %self.listing.id,
            start = %request.range.start(),
            end = %request.range.end(),
            total = %request.total_price,
            "listing reserved"
        );

        let refreshed = self.gateway.fetch_reservations(self.listing.id).await;
        let mut state = lock(&self.state);
        state.selection = DateInterval::single_day(self.today);
        match refreshed {
            Ok(reservations) => state.replace_reservations(reservations),
            Err(err) => {
                tracing::warn!(listing_id = %self.listing.id, error = %err, "could not refresh reservations");
            }
        }
        Ok(SubmitOutcome::Reserved)
    }

    /// Re-read the listing's reservations and recompute the blocked days.
    ///
    /// # Errors
    ///
    /// Returns the gateway error; the previous snapshot is kept.
    pub async fn refresh(&self) -> Result<(), HearthError> {
        let reservations = self.gateway.fetch_reservations(self.listing.id).await?;
        lock(&self.state).replace_reservations(reservations);
        Ok(())
    }

    /// React to a lifecycle event. Returns `true` when it triggered a refresh.
    ///
    /// # Errors
    ///
    /// Returns the gateway error from the refresh.
    pub async fn on_event(&self, event: &Event) -> Result<bool, HearthError> {
        if event.listing_id != self.listing.id || !event.affects_availability() {
            return Ok(false);
        }
        self.refresh().await?;
        Ok(true)
    }
}
