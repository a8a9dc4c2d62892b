use std::collections::HashSet;

use proptest::prelude::*;
use taskplan::model::TaskId;
use taskplan::plan::PlanBuilder;
use taskplan::resolve::{keyword_relation, phase_of, PrerequisiteRelation};
use taskplan_test_utils::builders::{tasks_named, TaskBuilder};

fn task_names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("task {i}")).collect()
}

// Strategy to generate an acyclic relation.
// Acyclicity is ensured by only letting a task depend on tasks with a
// larger index, so index order is *not* a valid answer in general.
fn acyclic_relation_strategy(max_tasks: usize) -> impl Strategy<Value = PrerequisiteRelation> {
    (1..=max_tasks).prop_flat_map(|n| {
        proptest::collection::vec(proptest::collection::vec(any::<usize>(), 0..n), n).prop_map(
            move |raw| {
                let lists = raw
                    .into_iter()
                    .enumerate()
                    .map(|(i, picks)| {
                        let later = n - i - 1;
                        if later == 0 {
                            return Vec::new();
                        }
                        picks
                            .into_iter()
                            .map(|p| i + 1 + p % later)
                            .collect::<HashSet<_>>()
                            .into_iter()
                            .collect()
                    })
                    .collect();
                PrerequisiteRelation::from_lists(lists)
            },
        )
    })
}

// An acyclic relation plus one back edge that closes a cycle.
fn cyclic_relation_strategy(max_tasks: usize) -> impl Strategy<Value = PrerequisiteRelation> {
    (2..=max_tasks).prop_flat_map(|n| {
        (0..n - 1, any::<usize>()).prop_map(move |(start, len)| {
            // Chain start -> start+1 -> ... -> end, then end -> start.
            let end = start + 1 + len % (n - start - 1);
            let mut rel = PrerequisiteRelation::empty(n);
            for i in start..end {
                rel.add(i + 1, i);
            }
            rel.add(start, end);
            rel
        })
    })
}

const WORDS: &[&str] = &[
    "plan", "research", "design", "write", "arrange", "test", "submit", "eat", "market", "sleep",
    "call", "water", "tidy",
];

proptest! {
    #[test]
    fn valid_order_respects_every_prerequisite(relation in acyclic_relation_strategy(12)) {
        let names = task_names(relation.len());
        let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let tasks = tasks_named(&name_refs);

        let plan = PlanBuilder::new().build(&tasks, &relation);
        prop_assert!(plan.is_valid());

        let order = plan.execution_order();
        prop_assert_eq!(order.len(), tasks.len());
        let unique: HashSet<&TaskId> = order.iter().collect();
        prop_assert_eq!(unique.len(), tasks.len());

        let position = |i: usize| order.iter().position(|id| id == &tasks[i].id).unwrap();
        for (task, prereqs) in relation.iter() {
            for &prereq in prereqs {
                prop_assert!(position(prereq) < position(task));
            }
        }
    }

    #[test]
    fn order_is_deterministic(relation in acyclic_relation_strategy(12)) {
        let names = task_names(relation.len());
        let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let tasks = tasks_named(&name_refs);

        let first = PlanBuilder::new().build(&tasks, &relation);
        let second = PlanBuilder::new().build(&tasks, &relation);
        prop_assert_eq!(first.execution_order(), second.execution_order());
    }

    #[test]
    fn any_cycle_gives_empty_invalid_plan(relation in cyclic_relation_strategy(12)) {
        let names = task_names(relation.len());
        let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let tasks = tasks_named(&name_refs);

        let plan = PlanBuilder::new().build(&tasks, &relation);
        prop_assert!(!plan.is_valid());
        prop_assert!(plan.execution_order().is_empty());
        prop_assert!(!plan.error_message().unwrap_or("").is_empty());
    }

    #[test]
    fn keyword_relation_matches_phase_rule(picks in proptest::collection::vec(0..WORDS.len(), 0..10)) {
        let tasks: Vec<_> = picks
            .iter()
            .enumerate()
            .map(|(i, &w)| TaskBuilder::new(&format!("{} {i}", WORDS[w])).id(&format!("t{i}")).build())
            .collect();

        let relation = keyword_relation(&tasks);
        prop_assert_eq!(&relation, &keyword_relation(&tasks));

        for i in 0..tasks.len() {
            for j in 0..tasks.len() {
                let expected = i != j && phase_of(&tasks[j]) < phase_of(&tasks[i]);
                prop_assert_eq!(relation.depends_on(i, j), expected);
            }
        }

        // The keyword relation is always acyclic.
        prop_assert!(PlanBuilder::new().build(&tasks, &relation).is_valid());
    }
}
