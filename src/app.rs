// src/app.rs

//! Application state: the one object a UI or CLI holds.
//!
//! Owns the task store, the resolver, the execution controller, the current
//! plan and the last reasoning trace. Nothing here is global; callers pass
//! the `AppState` around explicitly.

use tokio::sync::watch;
use tracing::debug;

use crate::config::ConfigFile;
use crate::errors::{Result, TaskplanError};
use crate::exec::{ExecutionController, ExecutionSnapshot, SessionReport};
use crate::model::{ExecutionPlan, Task, TaskId};
use crate::plan::generate_plan;
use crate::resolve::DependencyResolver;
use crate::store::TaskStore;

#[derive(Debug)]
pub struct AppState {
    store: TaskStore,
    resolver: DependencyResolver,
    controller: ExecutionController,
    current_plan: Option<ExecutionPlan>,
    reasoning: Vec<String>,
}

impl AppState {
    pub fn new(resolver: DependencyResolver, controller: ExecutionController) -> Self {
        Self {
            store: TaskStore::new(),
            resolver,
            controller,
            current_plan: None,
            reasoning: Vec::new(),
        }
    }

    /// Build state from a validated config: resolver selection, step delay
    /// and the initial task list.
    pub fn from_config(cfg: &ConfigFile, resolver: DependencyResolver) -> Result<Self> {
        let controller = ExecutionController::new(cfg.execution.step_delay());
        let mut state = Self::new(resolver, controller);
        for entry in &cfg.task {
            state.submit(&entry.name, &entry.description, entry.priority)?;
        }
        Ok(state)
    }

    /// Add a task. Any cached plan is discarded.
    pub fn submit(&mut self, name: &str, description: &str, priority: u8) -> Result<TaskId> {
        let id = self.store.submit(name, description, priority)?;
        self.invalidate_plan();
        Ok(id)
    }

    /// Delete a task. Rejected while a session is executing.
    pub fn delete(&mut self, id: &TaskId) -> Result<Task> {
        self.ensure_idle()?;
        let task = self.store.delete(id)?;
        self.invalidate_plan();
        Ok(task)
    }

    /// Delete every task. Rejected while a session is executing.
    pub fn clear(&mut self) -> Result<()> {
        self.ensure_idle()?;
        self.store.clear();
        self.invalidate_plan();
        Ok(())
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.list()
    }

    pub fn resolver(&self) -> &DependencyResolver {
        &self.resolver
    }

    /// Resolve dependencies and build a new plan, replacing the old one.
    ///
    /// Rejected while a session is executing.
    pub async fn generate_plan(&mut self) -> Result<&ExecutionPlan> {
        self.ensure_idle()?;

        let outcome = generate_plan(&self.resolver, self.store.list()).await;
        self.reasoning = outcome.trace;
        Ok(self.current_plan.insert(outcome.plan))
    }

    pub fn current_plan(&self) -> Option<&ExecutionPlan> {
        self.current_plan.as_ref()
    }

    /// Reasoning trace from the last `generate_plan`.
    pub fn reasoning(&self) -> &[String] {
        &self.reasoning
    }

    /// Start executing the current plan.
    pub fn execute(&mut self) -> Result<u64> {
        let plan = self.current_plan.as_ref().ok_or_else(|| {
            TaskplanError::InvalidPlanStart("no plan has been generated".to_string())
        })?;
        self.controller.start(plan)
    }

    pub fn stop(&self) -> bool {
        self.controller.stop()
    }

    pub fn pause(&self) -> bool {
        self.controller.pause()
    }

    pub fn resume(&self) -> bool {
        self.controller.resume()
    }

    pub fn is_executing(&self) -> bool {
        self.controller.is_active()
    }

    pub fn subscribe(&self) -> watch::Receiver<ExecutionSnapshot> {
        self.controller.subscribe()
    }

    pub fn snapshot(&self) -> ExecutionSnapshot {
        self.controller.snapshot()
    }

    pub async fn wait(&mut self) -> Result<Option<SessionReport>> {
        self.controller.wait().await
    }

    pub fn controller(&self) -> &ExecutionController {
        &self.controller
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.controller.is_active() {
            return Err(TaskplanError::SessionActive);
        }
        Ok(())
    }

    fn invalidate_plan(&mut self) {
        if self.current_plan.take().is_some() {
            debug!("task list changed; discarding current plan");
        }
        if !self.reasoning.is_empty() {
            self.reasoning.clear();
            debug!("reasoning trace cleared");
        }
    }
}
