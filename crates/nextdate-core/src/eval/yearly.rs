//! Anniversary rule (`y`).

use crate::date::CalendarDate;
use crate::error::EvalError;

/// Returns the first anniversary of `anchor` strictly after `reference`.
///
/// Every candidate is derived from the anchor itself, so a February 29 anchor
/// comes back to February 29 in leap years and falls on February 28 otherwise.
pub fn next_yearly(reference: CalendarDate, anchor: CalendarDate) -> Result<CalendarDate, EvalError> {
    // Candidates before this year offset are all on or before the reference.
    let mut years = u32::try_from(reference.year() - anchor.year())
        .unwrap_or(0)
        .max(1);
    // At most two iterations: the first candidate is in the reference's year
    // (or later), the next one is a year past it.
    loop {
        let candidate = anchor.add_years(years).ok_or(EvalError::OutOfRange)?;
        if candidate > reference {
            return Ok(candidate);
        }
        years += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn next_year_when_anchor_is_reference() {
        assert_eq!(
            next_yearly(date(2024, 3, 10), date(2024, 3, 10)),
            Ok(date(2025, 3, 10))
        );
    }

    #[test]
    fn same_year_when_anniversary_is_ahead() {
        assert_eq!(
            next_yearly(date(2024, 3, 10), date(2019, 11, 2)),
            Ok(date(2024, 11, 2))
        );
    }

    #[test]
    fn following_year_when_anniversary_passed() {
        assert_eq!(
            next_yearly(date(2024, 12, 1), date(2019, 11, 2)),
            Ok(date(2025, 11, 2))
        );
        assert_eq!(
            next_yearly(date(2024, 11, 2), date(2019, 11, 2)),
            Ok(date(2025, 11, 2))
        );
    }

    #[test]
    fn future_anchor_adds_one_year() {
        assert_eq!(
            next_yearly(date(2024, 1, 1), date(2026, 5, 5)),
            Ok(date(2027, 5, 5))
        );
    }

    #[test]
    fn leap_day_anchor() {
        assert_eq!(
            next_yearly(date(2024, 1, 15), date(2020, 2, 29)),
            Ok(date(2024, 2, 29))
        );
        assert_eq!(
            next_yearly(date(2024, 3, 1), date(2020, 2, 29)),
            Ok(date(2025, 2, 28))
        );
        assert_eq!(
            next_yearly(date(2025, 3, 1), date(2020, 2, 29)),
            Ok(date(2026, 2, 28))
        );
    }

    #[test]
    fn overflow_is_reported() {
        let max = date(9999, 12, 31);
        assert_eq!(next_yearly(max, max), Err(EvalError::OutOfRange));
        assert_eq!(
            next_yearly(date(9999, 12, 15), date(9999, 12, 15)),
            Err(EvalError::OutOfRange)
        );
    }

    #[test]
    fn last_representable_year_is_reachable() {
        assert_eq!(
            next_yearly(date(9999, 1, 1), date(9998, 6, 1)),
            Ok(date(9999, 6, 1))
        );
    }
}
