//! Room-availability logic.
//!
//! A stay occupies the half-open date range `[check_in, check_out)`: the
//! guest sleeps every night from check-in up to, but not including, the
//! check-out date. Conflict detection expands ranges into night sets and
//! checks for a non-empty intersection, so back-to-back stays (one guest
//! checking out the morning another checks in) never collide.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};
use thiserror::Error;

/// Rejected date range: the check-out must fall after the check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Incorrect check-in/check-out dates")]
pub struct InvalidStay;

/// A validated stay request. `check_out` is strictly after `check_in`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stay {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl Stay {
    /// Build a stay, rejecting empty or reversed date ranges.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, InvalidStay> {
        if check_out <= check_in {
            return Err(InvalidStay);
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Every night the stay occupies: check-in day through the day before
    /// check-out.
    pub fn nights(&self) -> HashSet<NaiveDate> {
        let mut nights = HashSet::new();
        let mut day = self.check_in;
        while day < self.check_out {
            nights.insert(day);
            day = day + Duration::days(1);
        }
        nights
    }

    /// Whether any requested night is already in `booked`.
    pub fn conflicts_with(&self, booked: &HashSet<NaiveDate>) -> bool {
        let mut day = self.check_in;
        while day < self.check_out {
            if booked.contains(&day) {
                return true;
            }
            day = day + Duration::days(1);
        }
        false
    }
}

/// Union of the night sets of a room's existing bookings.
///
/// Stored ranges are taken as-is; a range with `check_out <= check_in`
/// contributes no nights.
pub fn booked_nights<I>(bookings: I) -> HashSet<NaiveDate>
where
    I: IntoIterator<Item = (NaiveDate, NaiveDate)>,
{
    let mut nights = HashSet::new();
    for (check_in, check_out) in bookings {
        let mut day = check_in;
        while day < check_out {
            nights.insert(day);
            day = day + Duration::days(1);
        }
    }
    nights
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn stay_rejects_reversed_and_zero_length_ranges() {
        assert!(Stay::new(date(2024, 5, 10), date(2024, 5, 10)).is_err());
        assert!(Stay::new(date(2024, 5, 10), date(2024, 5, 9)).is_err());
        assert!(Stay::new(date(2024, 5, 10), date(2024, 5, 11)).is_ok());
    }

    #[test]
    fn nights_exclude_the_checkout_day() {
        let stay = Stay::new(date(2024, 5, 10), date(2024, 5, 13)).unwrap();
        let nights = stay.nights();
        assert_eq!(nights.len(), 3);
        assert!(nights.contains(&date(2024, 5, 10)));
        assert!(nights.contains(&date(2024, 5, 12)));
        assert!(!nights.contains(&date(2024, 5, 13)));
    }

    #[test]
    fn nights_cross_month_boundaries() {
        let stay = Stay::new(date(2024, 1, 30), date(2024, 2, 2)).unwrap();
        let nights = stay.nights();
        assert_eq!(nights.len(), 3);
        assert!(nights.contains(&date(2024, 1, 31)));
        assert!(nights.contains(&date(2024, 2, 1)));
    }

    #[test]
    fn back_to_back_stays_do_not_conflict() {
        let booked = booked_nights([(date(2024, 5, 10), date(2024, 5, 13))]);
        let next = Stay::new(date(2024, 5, 13), date(2024, 5, 15)).unwrap();
        assert!(!next.conflicts_with(&booked));

        let previous = Stay::new(date(2024, 5, 8), date(2024, 5, 10)).unwrap();
        assert!(!previous.conflicts_with(&booked));
    }

    #[test]
    fn any_shared_night_conflicts() {
        let booked = booked_nights([(date(2024, 5, 10), date(2024, 5, 13))]);

        // identical range
        let same = Stay::new(date(2024, 5, 10), date(2024, 5, 13)).unwrap();
        assert!(same.conflicts_with(&booked));

        // overlaps only the last booked night
        let tail = Stay::new(date(2024, 5, 12), date(2024, 5, 20)).unwrap();
        assert!(tail.conflicts_with(&booked));

        // fully contains the booked range
        let outer = Stay::new(date(2024, 5, 1), date(2024, 5, 30)).unwrap();
        assert!(outer.conflicts_with(&booked));
    }

    #[test]
    fn booked_nights_unions_multiple_bookings() {
        let booked = booked_nights([
            (date(2024, 5, 1), date(2024, 5, 3)),
            (date(2024, 5, 10), date(2024, 5, 12)),
        ]);
        assert_eq!(booked.len(), 4);

        let gap = Stay::new(date(2024, 5, 3), date(2024, 5, 10)).unwrap();
        assert!(!gap.conflicts_with(&booked));
    }

    #[test]
    fn degenerate_stored_ranges_contribute_nothing() {
        let booked = booked_nights([(date(2024, 5, 10), date(2024, 5, 10))]);
        assert!(booked.is_empty());
    }
}
