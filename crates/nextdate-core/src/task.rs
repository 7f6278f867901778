//! Task records and the scheduling policy applied to them.
//!
//! A [`Task`] is the record exchanged with storage and API layers: its date
//! and repeat rule are kept in their text forms (`YYYYMMDD` and the compact
//! rule syntax). The rules deciding *which* reference and anchor dates to
//! feed the recurrence engine live here, not in the engine itself.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::date::CalendarDate;
use crate::error::{RecurrenceError, TaskError};
use crate::rule::RecurrenceRule;

/// Default maximum number of tasks returned by a search.
pub const DEFAULT_SEARCH_LIMIT: usize = 50;

/// Search text that is treated as a date (`DD.MM.YYYY`).
static DATE_QUERY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{2}\.[0-9]{2}\.[12][0-9]{3}$").expect("Invalid date query regex")
});

/// A scheduled task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Storage identifier.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Due date, `YYYYMMDD`. Empty means "today" when the task is created.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub date: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
    /// Repeat rule. Empty for one-off tasks.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub repeat: String,
}

/// What happens to a task once it is marked done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "date", rename_all = "snake_case")]
pub enum Completion {
    /// One-off task: remove it.
    Remove,
    /// Recurring task: move it to the given date.
    Reschedule(CalendarDate),
}

impl Completion {
    /// The new due date, if the task stays.
    pub fn date(&self) -> Option<CalendarDate> {
        match self {
            Self::Remove => None,
            Self::Reschedule(date) => Some(*date),
        }
    }
}

impl Task {
    /// Creates a one-off task with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Builder: set the due date (`YYYYMMDD`).
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Builder: set the repeat rule.
    pub fn with_repeat(mut self, repeat: impl Into<String>) -> Self {
        self.repeat = repeat.into();
        self
    }

    /// Builder: set the comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// The parsed due date, `None` when unset.
    pub fn due_date(&self) -> Result<Option<CalendarDate>, RecurrenceError> {
        if self.date.is_empty() {
            Ok(None)
        } else {
            CalendarDate::parse(&self.date).map(Some)
        }
    }

    /// The parsed repeat rule, `None` for one-off tasks.
    pub fn rule(&self) -> Result<Option<RecurrenceRule>, RecurrenceError> {
        if self.repeat.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(RecurrenceRule::parse(&self.repeat)?))
        }
    }

    /// Checks that the task has a title and that its date and rule parse.
    pub fn validate(&self) -> Result<(), TaskError> {
        if self.title.trim().is_empty() {
            return Err(TaskError::MissingTitle);
        }
        self.due_date()?;
        self.rule()?;
        Ok(())
    }

    /// The date a newly submitted task is stored with.
    ///
    /// Tasks without a date are due `today`. A date in the past is moved to
    /// the rule's next occurrence after `today`, or to `today` itself for
    /// one-off tasks. Dates from `today` on are kept.
    pub fn scheduled_date(&self, today: CalendarDate) -> Result<CalendarDate, TaskError> {
        self.validate()?;
        let Some(due) = self.due_date()? else {
            return Ok(today);
        };
        if due >= today {
            return Ok(due);
        }
        let scheduled = match self.rule()? {
            Some(rule) => rule.next_after(today, due)?,
            None => today,
        };
        debug!(title = %self.title, %due, %scheduled, "moved overdue task");
        Ok(scheduled)
    }

    /// Marks the task as done on `today`.
    ///
    /// A recurring task moves to the next occurrence after `today`, measured
    /// from its current due date.
    pub fn complete(&self, today: CalendarDate) -> Result<Completion, TaskError> {
        let Some(rule) = self.rule()? else {
            return Ok(Completion::Remove);
        };
        let anchor = self.due_date()?.unwrap_or(today);
        Ok(Completion::Reschedule(rule.next_after(today, anchor)?))
    }

    /// Whether the task matches a search query.
    pub fn matches(&self, query: &SearchQuery) -> bool {
        match query {
            SearchQuery::All => true,
            SearchQuery::Date(date) => self.date == date.to_string(),
            SearchQuery::Text(text) => {
                let needle = text.to_lowercase();
                self.title.to_lowercase().contains(&needle)
                    || self.comment.to_lowercase().contains(&needle)
            }
        }
    }
}

/// A task search, as typed into a search box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    /// Empty search: every task.
    All,
    /// `DD.MM.YYYY`: tasks due on that date.
    Date(CalendarDate),
    /// Anything else: case-insensitive match on title or comment.
    Text(String),
}

impl SearchQuery {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() {
            return Self::All;
        }
        if DATE_QUERY_REGEX.is_match(input) {
            if let Some(date) = NaiveDate::parse_from_str(input, "%d.%m.%Y").ok().and_then(CalendarDate::from_naive) {
                return Self::Date(date);
            }
        }
        Self::Text(input.to_string())
    }
}

/// Returns up to `limit` tasks matching `query`, ordered by due date.
pub fn search<'a>(tasks: &'a [Task], query: &SearchQuery, limit: usize) -> Vec<&'a Task> {
    let mut found: Vec<&Task> = tasks.iter().filter(|task| task.matches(query)).collect();
    found.sort_by(|a, b| a.date.cmp(&b.date));
    found.truncate(limit);
    found
}
