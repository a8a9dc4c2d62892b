// src/types.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Execution status of a single task.
///
/// The simulated controller only ever moves tasks between `Pending`,
/// `Running` and `Completed`. `Failed` is reserved for a real executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::Running => "Running",
            TaskStatus::Completed => "Completed",
            TaskStatus::Failed => "Failed",
        };
        f.write_str(s)
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "running" => Ok(TaskStatus::Running),
            "completed" => Ok(TaskStatus::Completed),
            "failed" => Ok(TaskStatus::Failed),
            other => Err(format!(
                "invalid task status: {other} (expected pending, running, completed or failed)"
            )),
        }
    }
}

/// Lifecycle phase of the execution controller as seen by a reporting layer.
///
/// - `Idle`: no session has run yet.
/// - `Running`: the worker is advancing through the plan.
/// - `Paused`: the worker is holding at a task boundary.
/// - `Stopped`: the session was stopped; terminal for that session.
/// - `Completed`: every task in the plan completed; reported once per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Idle,
    Running,
    Paused,
    Stopped,
    Completed,
}

impl SessionPhase {
    /// Whether this phase ends a session.
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionPhase::Stopped | SessionPhase::Completed)
    }
}

impl Default for SessionPhase {
    fn default() -> Self {
        SessionPhase::Idle
    }
}

/// Where a prerequisite relation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionSource {
    /// Zero or one task; nothing to resolve.
    Trivial,
    /// The injected semantic classifier answered.
    Classifier,
    /// The keyword heuristic, either by configuration or after a classifier
    /// failure.
    Keywords,
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResolutionSource::Trivial => "trivial",
            ResolutionSource::Classifier => "semantic classifier",
            ResolutionSource::Keywords => "keyword heuristic",
        };
        f.write_str(s)
    }
}
