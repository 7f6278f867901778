//! Rule evaluation.
//!
//! [`RecurrenceRule::next_after`] dispatches to one algorithm per rule kind.
//! [`next_occurrence`] and [`next_date`] are the entry points used by task
//! handling code: the first works on [`CalendarDate`] values, the second on
//! the `YYYYMMDD` strings that task records carry.

mod daily;
mod monthly;
mod weekly;
mod yearly;

use tracing::debug;

pub use daily::next_daily;
pub use monthly::{next_monthly, resolve_day, MAX_SCAN_MONTHS};
pub use weekly::next_weekly;
pub use yearly::next_yearly;

use crate::date::CalendarDate;
use crate::error::{EvalError, RecurrenceResult};
use crate::rule::RecurrenceRule;

impl RecurrenceRule {
    /// Computes the next occurrence of this rule.
    ///
    /// `reference` is "today". Daily, weekly and yearly results are always
    /// strictly after it; monthly results are strictly after
    /// `max(anchor, reference)`.
    pub fn next_after(
        &self,
        reference: CalendarDate,
        anchor: CalendarDate,
    ) -> Result<CalendarDate, EvalError> {
        let next = match self {
            Self::Daily { interval_days } => next_daily(reference, anchor, *interval_days),
            Self::Weekly { weekdays } => next_weekly(reference, anchor, weekdays),
            Self::Monthly { days, months } => {
                next_monthly(reference, anchor, days, months.as_ref())
            }
            Self::Yearly => next_yearly(reference, anchor),
        }?;
        debug!(rule = %self, %reference, %anchor, %next, "computed next occurrence");
        Ok(next)
    }

    /// Returns the series of occurrences after `reference`, each one
    /// computed with the previous result as its anchor.
    pub fn occurrences(&self, reference: CalendarDate, anchor: CalendarDate) -> Occurrences<'_> {
        Occurrences {
            rule: self,
            reference,
            anchor,
            done: false,
        }
    }
}

/// Iterator over successive occurrences of a rule.
///
/// Yields strictly increasing dates. An evaluation error is yielded once and
/// ends the series.
#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    rule: &'a RecurrenceRule,
    reference: CalendarDate,
    anchor: CalendarDate,
    done: bool,
}

impl Iterator for Occurrences<'_> {
    type Item = Result<CalendarDate, EvalError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.rule.next_after(self.reference, self.anchor) {
            Ok(date) => {
                self.anchor = date;
                Some(Ok(date))
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

/// Computes the next occurrence of `spec` after `reference`.
///
/// A missing `anchor` means the rule is measured from `reference`.
pub fn next_occurrence(
    reference: CalendarDate,
    anchor: Option<CalendarDate>,
    spec: &str,
) -> RecurrenceResult<CalendarDate> {
    let rule = RecurrenceRule::parse(spec)?;
    Ok(rule.next_after(reference, anchor.unwrap_or(reference))?)
}

/// String form of [`next_occurrence`].
///
/// `now` and a non-empty `date` are `YYYYMMDD`; an empty `date` means `now`.
/// The result is `YYYYMMDD` as well.
pub fn next_date(now: &str, date: &str, repeat: &str) -> RecurrenceResult<String> {
    let reference = CalendarDate::parse(now)?;
    let anchor = if date.is_empty() {
        None
    } else {
        Some(CalendarDate::parse(date)?)
    };
    next_occurrence(reference, anchor, repeat).map(|d| d.to_string())
}
