// src/store.rs

//! In-memory task store.
//!
//! Owns [`Task`] records and assigns their identifiers. Tasks are listed in
//! submission order, which is the "original index" order the resolver and
//! plan builder work with.

use tracing::{debug, info};

use crate::errors::{Result, TaskplanError};
use crate::model::{Task, TaskId};

pub const MIN_PRIORITY: u8 = 1;
pub const MAX_PRIORITY: u8 = 10;

#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    counter: u64,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a task and return its new identifier.
    ///
    /// Rejects an empty (or whitespace-only) name and a priority outside
    /// 1..=10.
    pub fn submit(&mut self, name: &str, description: &str, priority: u8) -> Result<TaskId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TaskplanError::InvalidTask(
                "task name must not be empty".to_string(),
            ));
        }
        if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&priority) {
            return Err(TaskplanError::InvalidTask(format!(
                "priority for task '{name}' must be between {MIN_PRIORITY} and {MAX_PRIORITY} (got {priority})"
            )));
        }

        let id = TaskId::new(format!("task_{}", self.counter));
        self.counter += 1;

        let task = Task::new(id.clone(), name, description.trim(), priority);
        info!(task = %id, name = %task.name, priority, "task submitted");
        self.tasks.push(task);

        Ok(id)
    }

    pub fn delete(&mut self, id: &TaskId) -> Result<Task> {
        let pos = self
            .tasks
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| TaskplanError::TaskNotFound(id.to_string()))?;
        let task = self.tasks.remove(pos);
        debug!(task = %id, "task deleted");
        Ok(task)
    }

    /// Remove every task and reset identifier assignment.
    pub fn clear(&mut self) {
        self.tasks.clear();
        self.counter = 0;
        debug!("task store cleared");
    }

    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
