//! Date interval: a span of calendar days, inclusive on both ends.
//!
//! Used both for the span an existing reservation occupies and for the span
//! a guest is proposing to book. Day expansion ([`DateInterval::days`]) is
//! inclusive-inclusive; the night count ([`DateInterval::nights`]) is the
//! whole-day difference `end - start`.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Longest stay a single reservation or quote may cover.
pub const MAX_STAY_NIGHTS: u32 = 365;

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// A validated `start <= end` span of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct DateInterval {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawInterval {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawInterval> for DateInterval {
    type Error = ValidationError;

    fn try_from(raw: RawInterval) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl DateInterval {
    /// Build an interval, rejecting one that ends before it starts.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidRange`] when `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if end < start {
            return Err(ValidationError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A same-day interval. As a selection this means "nothing picked yet".
    #[must_use]
    pub fn single_day(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whole days between `start` and `end`; zero for a same-day interval.
    #[must_use]
    pub fn nights(&self) -> u32 {
        let days = (self.end - self.start).num_days();
        u32::try_from(days).unwrap_or(u32::MAX)
    }

    /// Whether the interval spans at least one night.
    #[must_use]
    pub fn is_selection(&self) -> bool {
        self.end > self.start
    }

    /// Every calendar day from `start` to `end`, both included.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    /// Whether the two intervals share at least one calendar day.
    #[must_use]
    pub fn overlaps(&self, other: &DateInterval) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Check that the interval can be quoted or booked.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::DateOutOfRange`] when either end falls outside
    ///   years 1 to 9999
    /// - [`ValidationError::RangeTooLong`] when the stay exceeds
    ///   [`MAX_STAY_NIGHTS`]
    pub fn check_stay(&self) -> Result<(), ValidationError> {
        for day in [self.start, self.end] {
            if !(MIN_YEAR..=MAX_YEAR).contains(&day.year()) {
                return Err(ValidationError::DateOutOfRange(day));
            }
        }
        let nights = self.nights();
        if nights > MAX_STAY_NIGHTS {
            return Err(ValidationError::RangeTooLong {
                nights,
                max: MAX_STAY_NIGHTS,
            });
        }
        Ok(())
    }
}
