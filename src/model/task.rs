// src/model/task.rs

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::types::TaskStatus;

/// Opaque, stable task identifier.
///
/// Identifiers are assigned by the task store and compared by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A unit of work with a name, description, priority and status.
///
/// Equality and hashing use only [`Task::id`]; two snapshots of the same
/// task with different statuses are still the same task.
#[derive(Debug, Clone, Serialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub description: String,
    /// 1-10, higher is more important. Informational only; ordering never
    /// looks at it.
    pub priority: u8,
    pub status: TaskStatus,
    pub created_at: DateTime<Local>,
}

impl Task {
    pub fn new(
        id: TaskId,
        name: impl Into<String>,
        description: impl Into<String>,
        priority: u8,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            priority,
            status: TaskStatus::Pending,
            created_at: Local::now(),
        }
    }

    /// Lowercased `name + " " + description`, the text the keyword
    /// heuristic scans.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.name, self.description).to_lowercase()
    }
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Task {}

impl Hash for Task {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
