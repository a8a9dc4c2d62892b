// src/exec/session.rs

//! One execution run over a valid plan.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info};

use crate::exec::control::ControlSignal;
use crate::exec::snapshot::{ExecutionSnapshot, TaskProgress};
use crate::model::{ExecutionPlan, Task, TaskStatus};
use crate::types::SessionPhase;

/// Result of a single [`ExecutionSession::advance_one`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// One task completed and more remain.
    Advanced,
    /// The last task completed; the session is over.
    Finished,
    /// A stop was observed; the session is over.
    Stopped,
}

/// Final state of a session, returned when its worker exits.
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub session: u64,
    pub phase: SessionPhase,
    pub tasks: Vec<Task>,
}

impl SessionReport {
    pub fn statuses(&self) -> Vec<TaskStatus> {
        self.tasks.iter().map(|t| t.status).collect()
    }
}

/// Working copy of a plan's tasks plus a cursor.
///
/// The session is the only writer of task statuses while it is alive.
/// Suspension points are the task boundary (pause and stop) and the
/// simulated delay (stop only).
pub struct ExecutionSession {
    id: u64,
    tasks: Vec<Task>,
    cursor: usize,
    step_delay: Duration,
    phase: SessionPhase,
    control_rx: watch::Receiver<ControlSignal>,
    status_tx: Arc<watch::Sender<ExecutionSnapshot>>,
}

impl std::fmt::Debug for ExecutionSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionSession")
            .field("id", &self.id)
            .field("cursor", &self.cursor)
            .field("len", &self.tasks.len())
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

impl ExecutionSession {
    /// Create a session over `plan`'s order with every task reset to
    /// `Pending`.
    pub fn new(
        id: u64,
        plan: &ExecutionPlan,
        step_delay: Duration,
        control_rx: watch::Receiver<ControlSignal>,
        status_tx: Arc<watch::Sender<ExecutionSnapshot>>,
    ) -> Self {
        let tasks = plan
            .ordered_tasks()
            .into_iter()
            .map(|t| {
                let mut task = t.clone();
                task.status = TaskStatus::Pending;
                task
            })
            .collect();

        Self {
            id,
            tasks,
            cursor: 0,
            step_delay,
            phase: SessionPhase::Running,
            control_rx,
            status_tx,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn snapshot(&self) -> ExecutionSnapshot {
        ExecutionSnapshot {
            session: self.id,
            phase: self.phase,
            tasks: self.tasks.iter().map(TaskProgress::from).collect(),
            current: (self.cursor < self.tasks.len()).then_some(self.cursor),
        }
    }

    /// Drive the session to the end.
    pub async fn run(mut self) -> SessionReport {
        info!(session = self.id, tasks = self.tasks.len(), "execution session started");
        self.publish();

        loop {
            match self.advance_one().await {
                StepOutcome::Advanced => continue,
                StepOutcome::Finished | StepOutcome::Stopped => break,
            }
        }

        SessionReport {
            session: self.id,
            phase: self.phase,
            tasks: self.tasks,
        }
    }

    /// Execute the task under the cursor.
    ///
    /// Pending -> Running, simulated delay, then Running -> Completed. A stop
    /// observed before the task starts or during the delay ends the session
    /// with the in-flight task back at `Pending`.
    pub async fn advance_one(&mut self) -> StepOutcome {
        if self.phase.is_terminal() {
            return self.terminal_outcome();
        }
        if self.cursor >= self.tasks.len() {
            return self.finish();
        }

        if !self.wait_at_boundary().await {
            return self.halt();
        }

        let idx = self.cursor;
        self.tasks[idx].status = TaskStatus::Running;
        info!(
            session = self.id,
            task = %self.tasks[idx].id,
            name = %self.tasks[idx].name,
            position = idx + 1,
            total = self.tasks.len(),
            "task running"
        );
        self.publish();

        let delay = self.step_delay;
        let control_rx = &mut self.control_rx;
        let stopped = tokio::select! {
            _ = tokio::time::sleep(delay) => false,
            _ = stop_signalled(control_rx) => true,
        };

        if stopped || self.stop_requested() {
            return self.halt();
        }

        self.tasks[idx].status = TaskStatus::Completed;
        self.cursor += 1;
        debug!(session = self.id, task = %self.tasks[idx].id, "task completed");

        if self.cursor == self.tasks.len() {
            self.finish()
        } else {
            self.publish();
            StepOutcome::Advanced
        }
    }

    /// Hold while paused. Returns `false` if a stop arrived (or the
    /// controller went away) instead.
    async fn wait_at_boundary(&mut self) -> bool {
        let mut announced_pause = false;

        loop {
            let signal = *self.control_rx.borrow_and_update();
            match signal {
                ControlSignal::Run => {
                    if announced_pause {
                        info!(session = self.id, "execution resumed");
                        self.phase = SessionPhase::Running;
                        self.publish();
                    }
                    return true;
                }
                ControlSignal::Stop => return false,
                ControlSignal::Pause => {
                    if !announced_pause {
                        info!(session = self.id, next = self.cursor + 1, "execution paused at task boundary");
                        self.phase = SessionPhase::Paused;
                        self.publish();
                        announced_pause = true;
                    }
                    if self.control_rx.changed().await.is_err() {
                        debug!(session = self.id, "controller dropped while paused");
                        return false;
                    }
                }
            }
        }
    }

    fn stop_requested(&self) -> bool {
        *self.control_rx.borrow() == ControlSignal::Stop
    }

    fn halt(&mut self) -> StepOutcome {
        for task in self.tasks.iter_mut() {
            if task.status == TaskStatus::Running {
                debug!(session = self.id, task = %task.id, "reverting in-flight task to Pending");
                task.status = TaskStatus::Pending;
            }
        }
        self.phase = SessionPhase::Stopped;
        info!(session = self.id, completed = self.cursor, total = self.tasks.len(), "execution stopped");
        self.publish();
        StepOutcome::Stopped
    }

    fn finish(&mut self) -> StepOutcome {
        self.phase = SessionPhase::Completed;
        info!(session = self.id, total = self.tasks.len(), "execution complete");
        self.publish();
        StepOutcome::Finished
    }

    fn terminal_outcome(&self) -> StepOutcome {
        if self.phase == SessionPhase::Completed {
            StepOutcome::Finished
        } else {
            StepOutcome::Stopped
        }
    }

    fn publish(&self) {
        self.status_tx.send_replace(self.snapshot());
    }
}

/// Resolves once a stop is signalled, or the controller is gone.
async fn stop_signalled(rx: &mut watch::Receiver<ControlSignal>) {
    let _ = rx.wait_for(|s| *s == ControlSignal::Stop).await;
}
