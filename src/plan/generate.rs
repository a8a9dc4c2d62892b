// src/plan/generate.rs

use tracing::info;

use crate::model::{ExecutionPlan, Task};
use crate::plan::builder::PlanBuilder;
use crate::resolve::{DependencyResolver, Resolution};

/// A freshly generated plan plus the reasoning trace that led to it.
///
/// The trace is display-only.
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    pub plan: ExecutionPlan,
    pub trace: Vec<String>,
    /// `None` when there were no tasks to resolve.
    pub resolution: Option<Resolution>,
}

/// Resolve dependencies for `tasks` and build a plan from them.
pub async fn generate_plan(resolver: &DependencyResolver, tasks: &[Task]) -> PlanOutcome {
    let mut trace = Vec::new();

    if tasks.is_empty() {
        trace.push("No tasks to execute.".to_string());
        return PlanOutcome {
            plan: ExecutionPlan::valid(Vec::new(), Vec::new()),
            trace,
            resolution: None,
        };
    }

    trace.push(format!(
        "STAGE 1: Analyzing relationships between {} task(s)...",
        tasks.len()
    ));
    let resolution = resolver.resolve(tasks).await;
    trace.push(format!("Dependencies resolved by {}.", resolution.source));

    let mut detected = String::from("Detected dependencies:");
    for (i, task) in tasks.iter().enumerate() {
        let prereqs = resolution.relation.prerequisites_of(i);
        if prereqs.is_empty() {
            detected.push_str(&format!(
                "\n• {} requires: nothing (can start immediately)",
                task.name
            ));
        } else {
            let names = prereqs
                .iter()
                .map(|&j| tasks[j].name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            detected.push_str(&format!("\n• {} requires: {}", task.name, names));
        }
    }
    trace.push(detected);

    trace.push("STAGE 2: Ordering tasks by dependencies...".to_string());
    let plan = PlanBuilder::new().build(tasks, &resolution.relation);

    if plan.is_valid() {
        trace.push("STAGE 3: Final execution order determined".to_string());
        trace.push(format!(
            "FINAL EXECUTION PLAN: {}",
            plan.ordered_names().join(" → ")
        ));
        info!(tasks = plan.len(), source = %resolution.source, "execution plan generated");
    } else {
        trace.push(format!(
            "ERROR: {}",
            plan.error_message().unwrap_or("invalid plan")
        ));
        info!(source = %resolution.source, "plan generation found a cycle");
    }

    PlanOutcome {
        plan,
        trace,
        resolution: Some(resolution),
    }
}
