// src/exec/mod.rs

//! Simulated plan execution.
//!
//! - [`control`] defines the control signal (run / pause / stop) shared
//!   between the controller and its worker.
//! - [`snapshot`] is the read-only status view published for reporting.
//! - [`session`] owns one run over a plan and advances it task by task.
//! - [`controller`] starts sessions on a dedicated Tokio task and forwards
//!   pause / resume / stop requests to them.
//!
//! Task statuses are written only by the session worker. Everyone else reads
//! them through a `tokio::sync::watch` channel of [`ExecutionSnapshot`]s.

pub mod control;
pub mod controller;
pub mod session;
pub mod snapshot;

pub use control::ControlSignal;
pub use controller::{ExecutionController, DEFAULT_STEP_DELAY};
pub use session::{ExecutionSession, SessionReport, StepOutcome};
pub use snapshot::{ExecutionSnapshot, TaskProgress};
