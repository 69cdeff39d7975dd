//! Enumerated status and priority values.
//!
//! - [`TaskStatus`] - where a task is in its forward-only lifecycle
//! - [`TaskPriority`] - fixed importance chosen at creation
//! - [`ProjectStatus`] - whether a project still accepts work
//!
//! String input is parsed case-insensitively at the boundary via [`FromStr`];
//! everything past that point works with the closed enums only.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Lowercases and strips separators so `In Progress`, `in-progress` and
/// `in_progress` all read the same.
fn normalize(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

// ============================================================================
// Task Status
// ============================================================================

/// Current state of a task.
///
/// # State Transitions
///
/// - `New` -> `InProgress`: work started
/// - `InProgress` -> `Done`: work finished
///
/// Nothing else is legal. `Done` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    New,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }

    /// Check if this state can transition to the target state.
    ///
    /// # Example
    ///
    /// ```
    /// use projman::model::TaskStatus;
    ///
    /// assert!(TaskStatus::New.can_transition_to(TaskStatus::InProgress));
    /// assert!(!TaskStatus::New.can_transition_to(TaskStatus::Done));
    /// assert!(!TaskStatus::Done.can_transition_to(TaskStatus::Done));
    /// ```
    #[must_use]
    pub fn can_transition_to(&self, target: TaskStatus) -> bool {
        use TaskStatus::*;
        matches!((self, target), (New, InProgress) | (InProgress, Done))
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Done)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "new" | "nieuw" => Ok(Self::New),
            "inprogress" | "bezig" => Ok(Self::InProgress),
            "done" | "afgerond" => Ok(Self::Done),
            _ => Err(ValidationError::InvalidStatus {
                value: s.to_string(),
            }),
        }
    }
}

// ============================================================================
// Task Priority
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    #[default]
    Normal,
    High,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "low" | "laag" => Ok(Self::Low),
            "normal" | "normaal" => Ok(Self::Normal),
            "high" | "hoog" => Ok(Self::High),
            _ => Err(ValidationError::InvalidPriority {
                value: s.to_string(),
            }),
        }
    }
}

// ============================================================================
// Project Status
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Active,
    Closed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
