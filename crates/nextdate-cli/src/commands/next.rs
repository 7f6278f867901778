//! `next` and `upcoming` commands.

use nextdate_core::{CalendarDate, RecurrenceError, RecurrenceRule, next_occurrence};
use serde::Serialize;
use tracing::debug;

use crate::cli::RuleArgs;
use crate::error::CliResult;

#[derive(Debug, Serialize)]
struct NextOutput {
    date: CalendarDate,
}

#[derive(Debug, Serialize)]
struct UpcomingOutput {
    rule: RecurrenceRule,
    dates: Vec<CalendarDate>,
}

/// Prints the next occurrence of the rule.
pub fn next(args: &RuleArgs, json: bool) -> CliResult<String> {
    let reference = args.now.unwrap_or_else(CalendarDate::today);
    debug!(%reference, repeat = %args.repeat, "computing next date");
    let date = next_occurrence(reference, args.date, &args.repeat)?;

    if json {
        Ok(serde_json::to_string(&NextOutput { date })?)
    } else {
        Ok(date.to_string())
    }
}

/// Prints the next `count` occurrences, one per line.
pub fn upcoming(args: &RuleArgs, count: usize, json: bool) -> CliResult<String> {
    let reference = args.now.unwrap_or_else(CalendarDate::today);
    let rule = RecurrenceRule::parse(&args.repeat).map_err(RecurrenceError::from)?;
    let dates = rule
        .occurrences(reference, args.date.unwrap_or(reference))
        .take(count)
        .collect::<Result<Vec<_>, _>>()?;

    if json {
        Ok(serde_json::to_string_pretty(&UpcomingOutput { rule, dates })?)
    } else {
        Ok(dates
            .iter()
            .map(CalendarDate::to_string)
            .collect::<Vec<_>>()
            .join("\n"))
    }
}
