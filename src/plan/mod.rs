// src/plan/mod.rs

//! Plan construction.
//!
//! - [`builder`] turns a prerequisite relation into an [`ExecutionPlan`]
//!   with Kahn's algorithm, detecting cycles.
//! - [`generate`] runs resolver + builder together and records the
//!   human-readable reasoning trace.
//!
//! [`ExecutionPlan`]: crate::model::ExecutionPlan

pub mod builder;
pub mod generate;

pub use builder::PlanBuilder;
pub use generate::{generate_plan, PlanOutcome};
