// src/exec/controller.rs

use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::errors::{Result, TaskplanError};
use crate::exec::control::{request_pause, request_resume, request_stop, ControlSignal};
use crate::exec::session::{ExecutionSession, SessionReport};
use crate::exec::snapshot::ExecutionSnapshot;
use crate::model::ExecutionPlan;
use crate::types::SessionPhase;

/// Simulated duration of one task.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(1500);

/// Handle for the session currently owned by the controller.
struct ActiveSession {
    id: u64,
    control_tx: watch::Sender<ControlSignal>,
    handle: JoinHandle<SessionReport>,
}

/// Runs one plan at a time on a dedicated Tokio task.
///
/// Starting while a session is still running is rejected with
/// [`TaskplanError::SessionActive`]; the caller must `stop()` (and
/// optionally `wait()`) first. A finished or stopped session is replaced by
/// the next `start`.
///
/// `start` spawns onto the current Tokio runtime and must be called from
/// within one.
pub struct ExecutionController {
    step_delay: Duration,
    status_tx: Arc<watch::Sender<ExecutionSnapshot>>,
    active: Option<ActiveSession>,
    session_counter: u64,
}

impl std::fmt::Debug for ExecutionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionController")
            .field("step_delay", &self.step_delay)
            .field("active", &self.active.as_ref().map(|a| a.id))
            .field("session_counter", &self.session_counter)
            .finish()
    }
}

impl Default for ExecutionController {
    fn default() -> Self {
        Self::new(DEFAULT_STEP_DELAY)
    }
}

impl ExecutionController {
    pub fn new(step_delay: Duration) -> Self {
        let (status_tx, _) = watch::channel(ExecutionSnapshot::default());
        Self {
            step_delay,
            status_tx: Arc::new(status_tx),
            active: None,
            session_counter: 0,
        }
    }

    pub fn step_delay(&self) -> Duration {
        self.step_delay
    }

    /// Subscribe to status snapshots. Receivers stay valid across sessions.
    pub fn subscribe(&self) -> watch::Receiver<ExecutionSnapshot> {
        self.status_tx.subscribe()
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> ExecutionSnapshot {
        self.status_tx.borrow().clone()
    }

    /// Whether a session is still running.
    ///
    /// A session stops counting as active as soon as its terminal snapshot
    /// is published, even if its worker has not returned yet.
    pub fn is_active(&self) -> bool {
        self.live_session().is_some()
    }

    /// Controller-level phase: the session's phase while one is active,
    /// `Idle` otherwise.
    pub fn phase(&self) -> SessionPhase {
        if self.is_active() {
            self.status_tx.borrow().phase
        } else {
            SessionPhase::Idle
        }
    }

    /// Start executing `plan`. Returns the new session id.
    pub fn start(&mut self, plan: &ExecutionPlan) -> Result<u64> {
        if !plan.is_valid() {
            let reason = plan.error_message().unwrap_or("plan is not valid").to_string();
            warn!(%reason, "refusing to start execution of an invalid plan");
            return Err(TaskplanError::InvalidPlanStart(reason));
        }
        if self.is_active() {
            warn!("refusing to start execution while a session is active");
            return Err(TaskplanError::SessionActive);
        }

        if let Some(previous) = self.active.take() {
            // Its worker may still be returning; the handle is detached.
            debug!(session = previous.id, "discarding finished session");
        }

        self.session_counter += 1;
        let id = self.session_counter;

        let (control_tx, control_rx) = watch::channel(ControlSignal::Run);
        let session = ExecutionSession::new(
            id,
            plan,
            self.step_delay,
            control_rx,
            Arc::clone(&self.status_tx),
        );
        self.status_tx.send_replace(session.snapshot());

        let handle = tokio::spawn(session.run());
        info!(session = id, tasks = plan.len(), delay_ms = self.step_delay.as_millis() as u64, "execution started");

        self.active = Some(ActiveSession {
            id,
            control_tx,
            handle,
        });
        Ok(id)
    }

    /// Request a stop. The in-flight task (if any) goes back to `Pending`.
    ///
    /// Returns `false` if there is no active session.
    pub fn stop(&self) -> bool {
        match self.live_session() {
            Some(session) => {
                if request_stop(&session.control_tx) {
                    info!(session = session.id, "stop requested");
                }
                true
            }
            None => {
                debug!("stop requested with no active session; ignoring");
                false
            }
        }
    }

    /// Hold the session before its next task. The in-flight task finishes.
    pub fn pause(&self) -> bool {
        match self.live_session() {
            Some(session) => {
                if request_pause(&session.control_tx) {
                    info!(session = session.id, "pause requested");
                }
                true
            }
            None => false,
        }
    }

    pub fn resume(&self) -> bool {
        match self.live_session() {
            Some(session) => {
                if request_resume(&session.control_tx) {
                    info!(session = session.id, "resume requested");
                }
                true
            }
            None => false,
        }
    }

    /// Wait for the current session's worker to exit and return its report.
    ///
    /// Returns `Ok(None)` if no session was started since the last `wait`.
    pub async fn wait(&mut self) -> Result<Option<SessionReport>> {
        let Some(session) = self.active.take() else {
            return Ok(None);
        };

        match session.handle.await {
            Ok(report) => Ok(Some(report)),
            Err(err) => {
                error!(session = session.id, error = %err, "execution worker failed");
                Err(TaskplanError::Other(anyhow!(
                    "execution worker for session {} failed: {err}",
                    session.id
                )))
            }
        }
    }

    fn live_session(&self) -> Option<&ActiveSession> {
        self.active
            .as_ref()
            .filter(|session| self.session_is_live(session))
    }

    fn session_is_live(&self, session: &ActiveSession) -> bool {
        if session.handle.is_finished() {
            return false;
        }
        let snapshot = self.status_tx.borrow();
        !(snapshot.session == session.id && snapshot.phase.is_terminal())
    }
}

impl Drop for ExecutionController {
    fn drop(&mut self) {
        if let Some(session) = self.active.as_ref() {
            request_stop(&session.control_tx);
        }
    }
}
