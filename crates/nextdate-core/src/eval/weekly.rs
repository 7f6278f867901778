//! Weekday-set rule (`w 1,3,5`).

use std::collections::BTreeSet;

use crate::date::CalendarDate;
use crate::error::EvalError;

/// Returns the first date strictly after `max(anchor, reference)` whose ISO
/// weekday (1 = Monday … 7 = Sunday) is in `weekdays`.
pub fn next_weekly(
    reference: CalendarDate,
    anchor: CalendarDate,
    weekdays: &BTreeSet<u32>,
) -> Result<CalendarDate, EvalError> {
    if let Some(&bad) = weekdays.iter().find(|d| !(1..=7).contains(*d)) {
        return Err(EvalError::InvalidWeekday(bad));
    }
    let first = *weekdays.first().ok_or(EvalError::EmptySet("weekday"))?;

    let start = anchor.max(reference);
    let today = start.iso_weekday();
    let ahead = match weekdays.range(today + 1..).next() {
        Some(&later) => later - today,
        // Wrap around to the earliest weekday of the following week.
        None => 7 - today + first,
    };

    start
        .add_days(u64::from(ahead))
        .ok_or(EvalError::OutOfRange)
}
