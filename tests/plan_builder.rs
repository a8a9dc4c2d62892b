// tests/plan_builder.rs

mod common;
use crate::common::{init_tracing, research_write_submit};

use std::sync::Arc;

use taskplan::model::TaskId;
use taskplan::plan::builder::topological_order;
use taskplan::plan::{generate_plan, PlanBuilder};
use taskplan::resolve::{DependencyResolver, PrerequisiteRelation};
use taskplan::types::ResolutionSource;
use taskplan_test_utils::builders::{tasks_named, TaskBuilder};
use taskplan_test_utils::fake_classifier::StaticClassifier;

fn ids(order: &[TaskId]) -> Vec<&str> {
    order.iter().map(TaskId::as_str).collect()
}

#[test]
fn chain_is_ordered_by_prerequisites() {
    init_tracing();

    let tasks = research_write_submit();
    let relation = PrerequisiteRelation::from_lists(vec![vec![], vec![0], vec![0, 1]]);

    let plan = PlanBuilder::new().build(&tasks, &relation);

    assert!(plan.is_valid());
    assert!(plan.error_message().is_none());
    assert_eq!(plan.ordered_names(), vec!["Research topic", "Write report", "Submit report"]);
    assert_eq!(ids(plan.execution_order()), vec!["task_0", "task_1", "task_2"]);
}

#[test]
fn no_prerequisites_keeps_submission_order_regardless_of_priority() {
    let tasks = vec![
        TaskBuilder::new("Low").id("a").priority(1).build(),
        TaskBuilder::new("High").id("b").priority(10).build(),
        TaskBuilder::new("Mid").id("c").priority(5).build(),
    ];

    let plan = PlanBuilder::new().build(&tasks, &PrerequisiteRelation::empty(3));

    assert_eq!(ids(plan.execution_order()), vec!["a", "b", "c"]);
}

#[test]
fn unblocked_tasks_are_queued_fifo() {
    // 1 and 2 wait for 0; 3 is free from the start. The queue starts as
    // [0, 3], so 3 runs before 1 and 2 even though its index is larger.
    let relation = PrerequisiteRelation::from_lists(vec![vec![], vec![0], vec![0], vec![]]);

    assert_eq!(topological_order(&relation).unwrap(), vec![0, 3, 1, 2]);
}

#[test]
fn same_input_always_gives_same_order() {
    let tasks = tasks_named(&["A", "B", "C", "D", "E", "F"]);
    let relation = PrerequisiteRelation::from_lists(vec![
        vec![],
        vec![0],
        vec![],
        vec![1, 2],
        vec![2],
        vec![3, 4],
    ]);

    let first = PlanBuilder::new().build(&tasks, &relation);
    for _ in 0..10 {
        let again = PlanBuilder::new().build(&tasks, &relation);
        assert_eq!(again.execution_order(), first.execution_order());
    }
    assert_eq!(first.ordered_names(), vec!["A", "C", "B", "E", "D", "F"]);
}

#[test]
fn cycle_gives_invalid_plan_naming_only_cycle_members() {
    let tasks = tasks_named(&["Alpha", "Beta", "Gamma", "Delta"]);
    // Alpha <-> Beta, Gamma waits on Beta, Delta is independent.
    let relation = PrerequisiteRelation::from_lists(vec![vec![1], vec![0], vec![1], vec![]]);

    let plan = PlanBuilder::new().build(&tasks, &relation);

    assert!(!plan.is_valid());
    assert!(plan.execution_order().is_empty());
    assert!(plan.is_empty());
    let msg = plan.error_message().expect("invalid plan must carry a message");
    assert!(msg.contains("Circular dependency"));
    assert!(msg.contains("Alpha"));
    assert!(msg.contains("Beta"));
    assert!(!msg.contains("Gamma"));
    assert!(!msg.contains("Delta"));
}

#[test]
fn self_dependency_is_a_cycle() {
    let tasks = tasks_named(&["Loop", "Free"]);
    let relation = PrerequisiteRelation::from_lists(vec![vec![0], vec![]]);

    let plan = PlanBuilder::new().build(&tasks, &relation);

    assert!(!plan.is_valid());
    assert!(plan.execution_order().is_empty());
    assert!(plan.error_message().unwrap().contains("Loop"));
}

#[test]
fn relation_size_mismatch_is_invalid() {
    let tasks = tasks_named(&["A", "B"]);
    let plan = PlanBuilder::new().build(&tasks, &PrerequisiteRelation::empty(3));

    assert!(!plan.is_valid());
    assert!(plan.execution_order().is_empty());
}

#[test]
fn empty_and_single_task_sets_are_trivially_valid() {
    let empty = PlanBuilder::new().build(&[], &PrerequisiteRelation::empty(0));
    assert!(empty.is_valid());
    assert!(empty.is_empty());

    let single = tasks_named(&["Only"]);
    let plan = PlanBuilder::new().build(&single, &PrerequisiteRelation::empty(1));
    assert!(plan.is_valid());
    assert_eq!(plan.ordered_names(), vec!["Only"]);
    assert_eq!(plan.task(&TaskId::new("task_0")).map(|t| t.name.as_str()), Some("Only"));
}

#[tokio::test]
async fn end_to_end_keyword_scenario() {
    init_tracing();

    let tasks = tasks_named(&["Submit report", "Research topic", "Write report"]);
    let outcome = generate_plan(&DependencyResolver::keywords_only(), &tasks).await;

    assert!(outcome.plan.is_valid());
    assert_eq!(
        outcome.plan.ordered_names(),
        vec!["Research topic", "Write report", "Submit report"]
    );

    let resolution = outcome.resolution.expect("tasks were resolved");
    assert_eq!(resolution.source, ResolutionSource::Keywords);

    let trace = outcome.trace.join("\n");
    assert!(trace.contains("keyword heuristic"));
    assert!(trace.contains("• Research topic requires: nothing (can start immediately)"));
    assert!(trace.contains("• Submit report requires: Research topic, Write report"));
    assert!(trace.contains("Research topic → Write report → Submit report"));
}

#[tokio::test]
async fn generate_plan_with_no_tasks() {
    let outcome = generate_plan(&DependencyResolver::keywords_only(), &[]).await;

    assert!(outcome.plan.is_valid());
    assert!(outcome.plan.is_empty());
    assert!(outcome.resolution.is_none());
    assert_eq!(outcome.trace, vec!["No tasks to execute.".to_string()]);
}

#[tokio::test]
async fn classifier_cycle_surfaces_as_invalid_plan() {
    let tasks = tasks_named(&["Wash dishes", "Dry dishes"]);
    let resolver = DependencyResolver::with_classifier(Arc::new(StaticClassifier::new(
        r#"{"dependencies": {"1": [2], "2": [1]}}"#,
    )));

    let outcome = generate_plan(&resolver, &tasks).await;

    assert!(!outcome.plan.is_valid());
    assert!(outcome.plan.execution_order().is_empty());
    assert!(outcome.trace.iter().any(|line| line.starts_with("ERROR: Circular dependency")));
}
