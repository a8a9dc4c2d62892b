// src/model/plan.rs

use std::collections::HashMap;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::model::task::{Task, TaskId};

/// A validated total ordering of tasks, or an explicit invalidity record.
///
/// Invariants:
/// - valid: `execution_order` is a permutation of the input task ids and
///   `error_message` is `None`;
/// - invalid: `execution_order` is empty and `error_message` is non-empty.
///
/// Plans are never mutated after construction; a new planning call produces
/// a new plan that supersedes the old one.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionPlan {
    execution_order: Vec<TaskId>,
    is_valid: bool,
    error_message: Option<String>,
    tasks: HashMap<TaskId, Task>,
    generated_at: DateTime<Local>,
}

impl ExecutionPlan {
    /// Build a valid plan. `tasks` is the snapshot used for lookups.
    pub fn valid(execution_order: Vec<TaskId>, tasks: impl IntoIterator<Item = Task>) -> Self {
        Self {
            execution_order,
            is_valid: true,
            error_message: None,
            tasks: tasks.into_iter().map(|t| (t.id.clone(), t)).collect(),
            generated_at: Local::now(),
        }
    }

    /// Build an invalid plan carrying `message`.
    pub fn invalid(message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.trim().is_empty() {
            message = "invalid plan".to_string();
        }
        Self {
            execution_order: Vec::new(),
            is_valid: false,
            error_message: Some(message),
            tasks: HashMap::new(),
            generated_at: Local::now(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn execution_order(&self) -> &[TaskId] {
        &self.execution_order
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn len(&self) -> usize {
        self.execution_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.execution_order.is_empty()
    }

    pub fn generated_at(&self) -> DateTime<Local> {
        self.generated_at
    }

    /// Task snapshots in execution order.
    pub fn ordered_tasks(&self) -> Vec<&Task> {
        self.execution_order
            .iter()
            .filter_map(|id| self.tasks.get(id))
            .collect()
    }

    /// Task names in execution order.
    pub fn ordered_names(&self) -> Vec<&str> {
        self.ordered_tasks()
            .into_iter()
            .map(|t| t.name.as_str())
            .collect()
    }
}
