//! On-disk record format.
//!
//! One JSON document per project holds both the project metadata and its
//! task list, so a single rename publishes both together.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Project, ProjectStatus, Task, TaskPriority, TaskStatus};

/// Current schema version for project records.
pub const RECORD_VERSION: u32 = 1;

/// Minimum supported version. There is no migration path; anything outside
/// `MIN_RECORD_VERSION..=RECORD_VERSION` is treated as corrupt.
pub const MIN_RECORD_VERSION: u32 = 1;

/// Everything stored for one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredProject {
    pub version: u32,
    pub project: ProjectRecord,
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub title: String,
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl StoredProject {
    #[must_use]
    pub fn is_compatible_version(&self) -> bool {
        self.version >= MIN_RECORD_VERSION && self.version <= RECORD_VERSION
    }

    /// Turn the record back into a project.
    ///
    /// # Errors
    ///
    /// Returns a reason string if the version is unsupported or the restored
    /// project violates an entity invariant.
    pub fn into_project(self) -> Result<Project, String> {
        if !self.is_compatible_version() {
            return Err(format!(
                "unsupported record version {} (supported: {}..={})",
                self.version, MIN_RECORD_VERSION, RECORD_VERSION
            ));
        }

        let tasks = self
            .tasks
            .into_iter()
            .map(|t| {
                Task::restore(
                    t.title,
                    t.description,
                    t.priority,
                    t.status,
                    t.created_at,
                    t.completed_at,
                )
            })
            .collect();

        let p = self.project;
        let project = Project::restore(
            p.name,
            p.description,
            p.status,
            p.created_at,
            p.closed_at,
            tasks,
        );
        project.check_invariants()?;
        Ok(project)
    }
}

impl From<&Project> for StoredProject {
    fn from(project: &Project) -> Self {
        Self {
            version: RECORD_VERSION,
            project: ProjectRecord {
                name: project.name().to_string(),
                description: project.description().map(str::to_string),
                status: project.status(),
                created_at: project.created_at(),
                closed_at: project.closed_at(),
            },
            tasks: project.tasks().iter().map(TaskRecord::from).collect(),
        }
    }
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title().to_string(),
            description: task.description().map(str::to_string),
            priority: task.priority(),
            status: task.status(),
            created_at: task.created_at(),
            completed_at: task.completed_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Project {
        let mut p = Project::new("WebApp", Some("A web application".into()));
        let mut t = Task::new("Homepage", None, TaskPriority::High);
        t.change_status(TaskStatus::InProgress).unwrap();
        p.add_task(t).unwrap();
        p.add_task(Task::new("Login", Some("OAuth".into()), TaskPriority::Low))
            .unwrap();
        p
    }

    #[test]
    fn test_record_field_names() {
        let json = serde_json::to_value(StoredProject::from(&sample())).unwrap();

        assert_eq!(json["version"], 1);
        assert_eq!(json["project"]["name"], "WebApp");
        assert_eq!(json["project"]["status"], "active");
        assert!(json["project"]["closed_at"].is_null());
        assert_eq!(json["tasks"][0]["priority"], "high");
        assert_eq!(json["tasks"][0]["status"], "in_progress");
        assert!(json["tasks"][0]["completed_at"].is_null());
        assert!(json["tasks"][1]["description"] == "OAuth");
    }

    #[test]
    fn test_record_restores_identical_project() {
        let original = sample();
        let json = serde_json::to_string_pretty(&StoredProject::from(&original)).unwrap();
        let restored = serde_json::from_str::<StoredProject>(&json)
            .unwrap()
            .into_project()
            .unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_unsupported_version_rejected() {
        let mut record = StoredProject::from(&sample());
        record.version = RECORD_VERSION + 1;
        let err = record.into_project().unwrap_err();
        assert!(err.contains("unsupported record version"));
    }

    #[test]
    fn test_invariant_violation_rejected() {
        let mut record = StoredProject::from(&sample());
        record.project.status = ProjectStatus::Closed;
        assert!(record.into_project().is_err());
    }
}
