//! Day-of-month rule (`m 1,-1 [3,6,9,12]`).
//!
//! The search walks forward from the day after the effective start, one month
//! at a time. Within a month every requested day is resolved against that
//! month's length (negative days count back from the end), and the earliest
//! resolved day at or after the cursor wins. Months outside the optional
//! month filter are skipped entirely, and entering a new month moves the
//! cursor to its first day.

use std::collections::BTreeSet;

use tracing::trace;

use crate::date::CalendarDate;
use crate::error::EvalError;

/// Upper bound on the number of months inspected. Nine years covers the
/// longest gap between two February 29ths.
pub const MAX_SCAN_MONTHS: u32 = 12 * 9;

/// Returns the first date strictly after `max(anchor, reference)` whose day
/// of month is one of `days` and, if given, whose month is one of `months`.
pub fn next_monthly(
    reference: CalendarDate,
    anchor: CalendarDate,
    days: &BTreeSet<i32>,
    months: Option<&BTreeSet<u32>>,
) -> Result<CalendarDate, EvalError> {
    validate(days, months)?;

    let start = anchor.max(reference);
    let mut cursor = start.succ().ok_or(EvalError::OutOfRange)?;

    for _ in 0..MAX_SCAN_MONTHS {
        let wanted = months.is_none_or(|months| months.contains(&cursor.month()));
        if wanted {
            let length = cursor.month_length();
            let hit = days
                .iter()
                .filter_map(|&day| resolve_day(day, length))
                .filter(|&day| day >= cursor.day())
                .min();
            if let Some(day) = hit {
                return CalendarDate::from_ymd(cursor.year(), cursor.month(), day)
                    .ok_or(EvalError::OutOfRange);
            }
        }
        trace!(month = cursor.month(), year = cursor.year(), wanted, "no match in month");
        cursor = cursor
            .first_day_of_next_month()
            .ok_or(EvalError::OutOfRange)?;
    }

    Err(EvalError::Unsatisfiable {
        months: MAX_SCAN_MONTHS,
    })
}

/// Resolves a requested day against a month of `month_length` days.
///
/// Positive days are taken as-is, negative days count from the end
/// (`-1` is the last day). Returns `None` when the day does not exist in
/// that month, e.g. `31` in April or `-30` in February.
pub fn resolve_day(day: i32, month_length: u32) -> Option<u32> {
    let length = i32::try_from(month_length).ok()?;
    let resolved = if day < 0 { length + 1 + day } else { day };
    if (1..=length).contains(&resolved) {
        u32::try_from(resolved).ok()
    } else {
        None
    }
}

fn validate(days: &BTreeSet<i32>, months: Option<&BTreeSet<u32>>) -> Result<(), EvalError> {
    if days.is_empty() {
        return Err(EvalError::EmptySet("day"));
    }
    if let Some(&bad) = days.iter().find(|&&d| d == 0 || !(-31..=31).contains(&d)) {
        return Err(EvalError::InvalidDay(bad));
    }
    if let Some(months) = months {
        if months.is_empty() {
            return Err(EvalError::EmptySet("month"));
        }
        if let Some(&bad) = months.iter().find(|m| !(1..=12).contains(*m)) {
            return Err(EvalError::InvalidMonth(bad));
        }
    }
    Ok(())
}
