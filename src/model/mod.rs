// src/model/mod.rs

//! Core data model: tasks and execution plans.
//!
//! - [`task`] defines [`Task`] and its opaque [`TaskId`].
//! - [`plan`] defines the immutable [`ExecutionPlan`] produced by the
//!   plan builder.

pub mod plan;
pub mod task;

pub use plan::ExecutionPlan;
pub use task::{Task, TaskId};
pub use crate::types::TaskStatus;
