//! Error types for rule parsing, rule evaluation and task handling.

use thiserror::Error;

/// Result type for boundary operations.
pub type RecurrenceResult<T> = Result<T, RecurrenceError>;

/// Errors raised while turning rule text into a [`RecurrenceRule`].
///
/// [`RecurrenceRule`]: crate::rule::RecurrenceRule
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The rule text is empty or only whitespace.
    #[error("empty repeat rule")]
    Empty,

    /// The kind tag is not one of `d`, `w`, `m`, `y`.
    #[error("unsupported repeat kind: {0}")]
    UnsupportedKind(String),

    /// A kind that needs parameters was given none.
    #[error("rule for {kind} should be defined")]
    MissingBody { kind: &'static str },

    /// A list item is not an integer.
    #[error("invalid number {token:?} in {field}")]
    InvalidNumber { field: &'static str, token: String },

    /// An integer lies outside the range allowed for its field.
    #[error("{field} value {value} is out of range {range}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        range: &'static str,
    },

    /// The monthly rule has more than a day list and a month list.
    #[error("monthly rule takes at most two lists, got {0}")]
    TooManyLists(usize),
}

/// Errors raised by a structurally valid rule that cannot produce a date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A day interval outside `1..=400`.
    #[error("interval {0} is out of range 1..=400")]
    InvalidInterval(u32),

    /// A weekday outside `1..=7`.
    #[error("weekday {0} is out of range 1..=7")]
    InvalidWeekday(u32),

    /// A day of month outside `-31..=-1` or `1..=31`.
    #[error("day of month {0} is out of range -31..=-1 or 1..=31")]
    InvalidDay(i32),

    /// A month outside `1..=12`.
    #[error("month {0} is out of range 1..=12")]
    InvalidMonth(u32),

    /// A weekday, day or month set with no members.
    #[error("{0} set must not be empty")]
    EmptySet(&'static str),

    /// No date satisfies the monthly rule within the search window.
    #[error("no date matches the monthly rule within {months} months")]
    Unsatisfiable { months: u32 },

    /// Date arithmetic ran past the supported calendar range.
    #[error("date is out of the supported calendar range")]
    OutOfRange,
}

/// Errors reported to callers of the boundary functions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecurrenceError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    /// A date string that is not a valid `YYYYMMDD` calendar date.
    #[error("invalid date {0:?}, expected YYYYMMDD")]
    InvalidDate(String),
}

/// Errors raised while validating or scheduling a task record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    /// The task has an empty title.
    #[error("task title must be specified")]
    MissingTitle,

    /// The task's repeat rule or date is unusable.
    #[error(transparent)]
    Recurrence(#[from] RecurrenceError),
}

impl From<ParseError> for TaskError {
    fn from(err: ParseError) -> Self {
        Self::Recurrence(err.into())
    }
}

impl From<EvalError> for TaskError {
    fn from(err: EvalError) -> Self {
        Self::Recurrence(err.into())
    }
}
