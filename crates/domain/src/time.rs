//! Time and calendar helpers.

use chrono::{DateTime, NaiveDate, Utc};

/// UTC timestamp used for `created_at`, event times, etc.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Return the current calendar day in UTC.
///
/// Availability and pricing work on timezone-naive calendar days.
#[must_use]
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_return_current_utc_time() {
        let before = Utc::now();
        let ts = now();
        let after = Utc::now();
        assert!(ts >= before);
        assert!(ts <= after);
    }

    #[test]
    fn should_return_today_as_calendar_day_of_now() {
        let before = Utc::now().date_naive();
        let day = today();
        let after = Utc::now().date_naive();
        assert!(day >= before && day <= after);
    }
}
