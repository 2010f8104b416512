//! Availability: which calendar days are already taken.
//!
//! Every existing reservation blocks each day of its interval, start and end
//! included. The result is rebuilt from scratch whenever the reservation list
//! changes; there is no incremental update.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date_interval::DateInterval;
use crate::reservation::Reservation;

/// Deduplicated, ordered set of days that can no longer be booked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisabledDates(BTreeSet<NaiveDate>);

impl DisabledDates {
    #[must_use]
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.0.contains(&day)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NaiveDate> {
        self.0.iter()
    }

    /// First disabled day falling inside `range`, if any.
    #[must_use]
    pub fn first_conflict(&self, range: &DateInterval) -> Option<NaiveDate> {
        self.0.range(range.start()..=range.end()).next().copied()
    }
}

impl FromIterator<NaiveDate> for DisabledDates {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Expand a set of intervals into the union of their days.
pub fn disabled_dates_for<I>(intervals: I) -> DisabledDates
where
    I: IntoIterator<Item = DateInterval>,
{
    intervals
        .into_iter()
        .flat_map(|interval| interval.days())
        .collect()
}

/// Compute the days blocked by `reservations`.
///
/// Input order is irrelevant; duplicates and overlaps collapse into a single
/// entry per day. An empty input yields an empty set.
pub fn disabled_dates<'a, I>(reservations: I) -> DisabledDates
where
    I: IntoIterator<Item = &'a Reservation>,
{
    disabled_dates_for(reservations.into_iter().map(Reservation::interval))
}
