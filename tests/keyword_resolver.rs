// tests/keyword_resolver.rs

mod common;
use crate::common::{init_tracing, research_write_submit};

use taskplan::resolve::keywords::phase_of_text;
use taskplan::resolve::{keyword_relation, phase_of, PrerequisiteRelation, DEFAULT_PHASE};
use taskplan_test_utils::builders::{tasks_described, tasks_named, TaskBuilder};

#[test]
fn research_write_submit_phases_and_relation() {
    init_tracing();

    let tasks = research_write_submit();
    let phases: Vec<u8> = tasks.iter().map(phase_of).collect();
    assert_eq!(phases, vec![2, 4, 7]);

    let relation = keyword_relation(&tasks);
    let expected = PrerequisiteRelation::from_lists(vec![vec![], vec![0], vec![0, 1]]);
    assert_eq!(relation, expected);
}

#[test]
fn higher_phase_depends_on_every_lower_phase_task() {
    // phase 2, phase 4
    let tasks = tasks_named(&["Gather data", "Code module"]);
    assert_eq!(phase_of(&tasks[0]), 2);
    assert_eq!(phase_of(&tasks[1]), 4);

    let relation = keyword_relation(&tasks);
    assert!(relation.depends_on(1, 0));
    assert!(!relation.depends_on(0, 1));
}

#[test]
fn tasks_without_keywords_share_default_phase_and_are_unordered() {
    let tasks = tasks_named(&["Call grandma", "Feed the cat"]);
    assert_eq!(phase_of(&tasks[0]), DEFAULT_PHASE);
    assert_eq!(phase_of(&tasks[1]), DEFAULT_PHASE);

    let relation = keyword_relation(&tasks);
    assert_eq!(relation.edge_count(), 0);
}

#[test]
fn clique_links_non_adjacent_phases_too() {
    // phases 1, 2, 4, 7: the last task depends on all three before it,
    // not only on the nearest one.
    let tasks = tasks_named(&["Plan trip", "Research hotels", "Write itinerary", "Publish blog"]);
    let relation = keyword_relation(&tasks);

    assert_eq!(
        relation.prerequisites_of(3).iter().copied().collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
    assert_eq!(
        relation.prerequisites_of(2).iter().copied().collect::<Vec<_>>(),
        vec![0, 1]
    );
    assert_eq!(relation.edge_count(), 6);
}

#[test]
fn minimum_matching_phase_wins() {
    assert_eq!(phase_of_text("test and deploy"), 6);
    assert_eq!(phase_of_text("plan then sleep"), 1);
    assert_eq!(phase_of_text("cook and eat dinner"), 4);
}

#[test]
fn description_is_scanned_case_insensitively() {
    let tasks = tasks_described(&[("Task one", "REVIEW the draft"), ("Task two", "")]);
    assert_eq!(phase_of(&tasks[0]), 6);
    assert_eq!(phase_of(&tasks[1]), DEFAULT_PHASE);

    // phase 5 task comes before the phase 6 task
    let relation = keyword_relation(&tasks);
    assert!(relation.depends_on(0, 1));
}

#[test]
fn matching_is_plain_substring() {
    // "plants" contains "plan"
    assert_eq!(phase_of(&TaskBuilder::new("Water plants").build()), 1);
    // "latest" contains "test"
    assert_eq!(phase_of_text("read the latest news"), 6);
}

#[test]
fn multi_word_keywords_match() {
    assert_eq!(phase_of_text("turn in homework"), 7);
}

#[test]
fn keyword_resolution_is_idempotent() {
    let tasks = tasks_named(&[
        "Sleep early",
        "Study chapter 3",
        "Submit assignment",
        "Eat lunch",
        "Call grandma",
    ]);

    let first = keyword_relation(&tasks);
    let second = keyword_relation(&tasks);
    assert_eq!(first, second);
}

#[test]
fn zero_and_one_task_have_no_prerequisites() {
    assert_eq!(keyword_relation(&[]).len(), 0);

    let single = tasks_named(&["Submit report"]);
    let relation = keyword_relation(&single);
    assert_eq!(relation.len(), 1);
    assert!(relation.prerequisites_of(0).is_empty());
}

#[test]
fn relation_rejects_out_of_range_indices() {
    let mut relation = PrerequisiteRelation::empty(2);
    assert!(relation.add(1, 0));
    assert!(!relation.add(2, 0));
    assert!(!relation.add(0, 5));
    assert_eq!(relation.edge_count(), 1);
    assert!(relation.prerequisites_of(7).is_empty());
}
