//! Fixed-interval rule (`d N`).

use crate::date::CalendarDate;
use crate::error::EvalError;
use crate::rule::MAX_INTERVAL_DAYS;

/// Returns `anchor + k * interval_days` for the smallest `k >= 1` that lands
/// strictly after `reference`.
pub fn next_daily(
    reference: CalendarDate,
    anchor: CalendarDate,
    interval_days: u32,
) -> Result<CalendarDate, EvalError> {
    if !(1..=MAX_INTERVAL_DAYS).contains(&interval_days) {
        return Err(EvalError::InvalidInterval(interval_days));
    }
    let interval = i64::from(interval_days);
    let behind = reference.days_since(anchor);
    let steps = if behind < 0 { 1 } else { behind / interval + 1 };

    let offset = u64::try_from(steps * interval).map_err(|_| EvalError::OutOfRange)?;
    anchor.add_days(offset).ok_or(EvalError::OutOfRange)
}
