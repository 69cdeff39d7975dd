//! Plain-text renderings of projects and tasks.
//!
//! Pure functions over the entities; the caller decides where the text goes.

use std::fmt::Write as _;

use chrono::{DateTime, Local, Utc};

use crate::model::{Project, Task};

/// Timestamp format used in every user-facing rendering.
pub const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// Project overview columns.
const NAME_WIDTH: usize = 30;
const STATUS_WIDTH: usize = 10;
const COUNT_WIDTH: usize = 12;

// Task list columns.
const TITLE_WIDTH: usize = 30;
const TASK_STATUS_WIDTH: usize = 12;
const PRIORITY_WIDTH: usize = 10;

const RULE_WIDTH: usize = 60;

/// Render a UTC timestamp in local time.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format(DISPLAY_TIME_FORMAT).to_string()
}

/// Tabular overview of all projects.
///
/// # Example
///
/// ```
/// use projman::model::Project;
/// use projman::report::project_overview;
///
/// let text = project_overview(&[Project::new("WebApp", None)]);
/// assert!(text.contains("WebApp"));
/// assert!(text.contains("active"));
/// ```
pub fn project_overview(projects: &[Project]) -> String {
    let mut out = String::from("=== PROJECT OVERVIEW ===\n");
    if projects.is_empty() {
        out.push_str("No projects found\n");
        return out;
    }

    let _ = writeln!(
        out,
        "{:<NAME_WIDTH$}{:<STATUS_WIDTH$}{:<COUNT_WIDTH$}",
        "Name", "Status", "Tasks"
    );
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');
    for project in projects {
        let _ = writeln!(
            out,
            "{:<NAME_WIDTH$}{:<STATUS_WIDTH$}{:<COUNT_WIDTH$}",
            project.name(),
            project.status().to_string(),
            project.task_count()
        );
    }
    out
}

/// The tasks of one project in display order.
pub fn task_list(project: &Project) -> String {
    let mut out = format!("=== TASKS IN PROJECT '{}' ===\n", project.name());
    if project.tasks().is_empty() {
        out.push_str("No tasks found\n");
        return out;
    }

    let _ = writeln!(
        out,
        "{:<TITLE_WIDTH$}{:<TASK_STATUS_WIDTH$}{:<PRIORITY_WIDTH$}",
        "Title", "Status", "Priority"
    );
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');
    for task in project.tasks() {
        let _ = writeln!(
            out,
            "{:<TITLE_WIDTH$}{:<TASK_STATUS_WIDTH$}{:<PRIORITY_WIDTH$}",
            task.title(),
            task.status().to_string(),
            task.priority().to_string()
        );
    }
    out
}

/// Everything known about one task.
pub fn task_details(task: &Task) -> String {
    let mut out = format!("=== TASK '{}' ===\n", task.title());
    let _ = writeln!(out, "Title:       {}", task.title());
    let _ = writeln!(
        out,
        "Description: {}",
        task.description().unwrap_or("No description")
    );
    let _ = writeln!(out, "Priority:    {}", task.priority());
    let _ = writeln!(out, "Status:      {}", task.status());
    let _ = writeln!(out, "Created:     {}", format_timestamp(task.created_at()));
    if let Some(completed) = task.completed_at() {
        let _ = writeln!(out, "Completed:   {}", format_timestamp(completed));
    }
    out
}
