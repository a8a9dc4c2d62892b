// src/exec/snapshot.rs

use serde::Serialize;

use crate::model::{Task, TaskId, TaskStatus};
use crate::types::SessionPhase;

/// Status of one task as seen by a reporting layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskProgress {
    pub id: TaskId,
    pub name: String,
    pub status: TaskStatus,
}

impl From<&Task> for TaskProgress {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            name: task.name.clone(),
            status: task.status,
        }
    }
}

/// Point-in-time view of an execution session.
///
/// Published by the worker after every status change. Once a session ends,
/// the last snapshot (phase `Stopped` or `Completed`) stays visible until the
/// next session starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionSnapshot {
    /// Session counter; 0 before the first session.
    pub session: u64,
    pub phase: SessionPhase,
    /// Tasks in plan order.
    pub tasks: Vec<TaskProgress>,
    /// Index of the task currently being worked on or waited for.
    pub current: Option<usize>,
}

impl ExecutionSnapshot {
    /// `(completed_count, total_count)`.
    pub fn progress(&self) -> (usize, usize) {
        let completed = self
            .tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Completed)
            .count();
        (completed, self.tasks.len())
    }

    pub fn statuses(&self) -> Vec<TaskStatus> {
        self.tasks.iter().map(|t| t.status).collect()
    }

    pub fn status_of(&self, id: &TaskId) -> Option<TaskStatus> {
        self.tasks.iter().find(|t| &t.id == id).map(|t| t.status)
    }

    /// The task currently `Running`, if any.
    pub fn running(&self) -> Option<&TaskProgress> {
        self.tasks.iter().find(|t| t.status == TaskStatus::Running)
    }
}
