//! Task record commands.

use std::path::Path;

use nextdate_core::{CalendarDate, Completion, SearchQuery, Task, search as search_tasks};
use serde::Serialize;
use tracing::info;

use super::read_input;
use crate::error::CliResult;

#[derive(Debug, Serialize)]
struct TaskList<'a> {
    tasks: Vec<&'a Task>,
}

fn read_task(file: &Path) -> CliResult<Task> {
    Ok(serde_json::from_str(&read_input(file)?)?)
}

/// Prints the date a new task is stored with; in JSON mode, the whole task
/// with that date filled in.
pub fn schedule(file: &Path, now: Option<CalendarDate>, json: bool) -> CliResult<String> {
    let today = now.unwrap_or_else(CalendarDate::today);
    let mut task = read_task(file)?;
    let date = task.scheduled_date(today)?;

    if json {
        task.date = date.to_string();
        Ok(serde_json::to_string_pretty(&task)?)
    } else {
        Ok(date.to_string())
    }
}

/// Prints the outcome of marking a task done: `remove`, or the new date.
pub fn done(file: &Path, now: Option<CalendarDate>, json: bool) -> CliResult<String> {
    let today = now.unwrap_or_else(CalendarDate::today);
    let task = read_task(file)?;
    let completion = task.complete(today)?;
    info!(title = %task.title, ?completion, "task done");

    if json {
        Ok(serde_json::to_string(&completion)?)
    } else {
        Ok(match completion {
            Completion::Remove => "remove".to_string(),
            Completion::Reschedule(date) => date.to_string(),
        })
    }
}

/// Prints the tasks in `file` matching `query`, ordered by date.
pub fn search(query: &str, file: &Path, limit: usize, json: bool) -> CliResult<String> {
    let tasks: Vec<Task> = serde_json::from_str(&read_input(file)?)?;
    let found = search_tasks(&tasks, &SearchQuery::parse(query), limit);

    if json {
        Ok(serde_json::to_string_pretty(&TaskList { tasks: found })?)
    } else {
        Ok(found
            .iter()
            .map(|task| format!("{:<8}  {}", task.date, task.title))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}
