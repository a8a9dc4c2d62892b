// src/plan/builder.rs

use std::collections::VecDeque;

use petgraph::algo::tarjan_scc;
use petgraph::graphmap::DiGraphMap;
use tracing::{debug, warn};

use crate::errors::TaskplanError;
use crate::model::{ExecutionPlan, Task};
use crate::resolve::PrerequisiteRelation;

/// Builds execution plans from a task list and its prerequisite relation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanBuilder;

impl PlanBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Topologically order `tasks` according to `relation`.
    ///
    /// Ties are broken by original index: tasks that become unblocked at the
    /// same time run in the order they were submitted. A cycle yields an
    /// invalid plan with an empty order; a partial order is never returned.
    pub fn build(&self, tasks: &[Task], relation: &PrerequisiteRelation) -> ExecutionPlan {
        if relation.len() != tasks.len() {
            warn!(
                tasks = tasks.len(),
                relation = relation.len(),
                "prerequisite relation does not match task list"
            );
            return ExecutionPlan::invalid(format!(
                "prerequisite relation covers {} tasks but {} were given",
                relation.len(),
                tasks.len()
            ));
        }

        match topological_order(relation) {
            Ok(order) => {
                debug!(?order, "topological order computed");
                let execution_order = order.iter().map(|&i| tasks[i].id.clone()).collect();
                ExecutionPlan::valid(execution_order, tasks.iter().cloned())
            }
            Err(unresolved) => {
                let members = cycle_members(relation, &unresolved);
                let names = members
                    .iter()
                    .map(|&i| tasks[i].name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                warn!(cycle = %names, "circular dependency detected");
                ExecutionPlan::invalid(TaskplanError::DagCycle(names).to_string())
            }
        }
    }
}

/// Kahn's algorithm with a FIFO queue seeded in ascending index order.
///
/// Returns the full order, or the indices that could not be scheduled when
/// the relation contains a cycle.
pub fn topological_order(relation: &PrerequisiteRelation) -> Result<Vec<usize>, Vec<usize>> {
    let n = relation.len();
    let mut in_degree = vec![0usize; n];
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); n];

    for (task, prereqs) in relation.iter() {
        in_degree[task] = prereqs.len();
        for &prereq in prereqs {
            successors[prereq].push(task);
        }
    }

    let mut queue: VecDeque<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
    let mut order = Vec::with_capacity(n);

    while let Some(current) = queue.pop_front() {
        order.push(current);
        for &next in &successors[current] {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                queue.push_back(next);
            }
        }
    }

    if order.len() == n {
        Ok(order)
    } else {
        Err((0..n).filter(|&i| in_degree[i] > 0).collect())
    }
}

/// Of the unresolved indices, those that actually sit on a cycle (as
/// opposed to merely depending on one), in ascending order.
fn cycle_members(relation: &PrerequisiteRelation, unresolved: &[usize]) -> Vec<usize> {
    let mut graph: DiGraphMap<usize, ()> = DiGraphMap::new();

    for &task in unresolved {
        graph.add_node(task);
    }
    for &task in unresolved {
        for &prereq in relation.prerequisites_of(task) {
            if graph.contains_node(prereq) {
                graph.add_edge(prereq, task, ());
            }
        }
    }

    let mut members: Vec<usize> = tarjan_scc(&graph)
        .into_iter()
        .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
        .flatten()
        .collect();
    members.sort_unstable();

    if members.is_empty() {
        // Unreachable for a well-formed relation; report everything left.
        unresolved.to_vec()
    } else {
        members
    }
}
