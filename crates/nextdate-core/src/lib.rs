//! Core types: calendar dates, recurrence rules, rule evaluation, task records

pub mod date;
pub mod error;
pub mod eval;
pub mod rule;
pub mod task;
pub mod tracing;

pub use date::{CalendarDate, MAX_YEAR, MIN_YEAR, first_day_of_month, last_day_of_month};
pub use error::{EvalError, ParseError, RecurrenceError, RecurrenceResult, TaskError};
pub use eval::{
    MAX_SCAN_MONTHS, Occurrences, next_daily, next_date, next_monthly, next_occurrence,
    next_weekly, next_yearly, resolve_day,
};
pub use rule::{MAX_INTERVAL_DAYS, RecurrenceRule};
pub use task::{Completion, DEFAULT_SEARCH_LIMIT, SearchQuery, Task, search};
pub use self::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
