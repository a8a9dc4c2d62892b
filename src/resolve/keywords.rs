// src/resolve/keywords.rs

//! Keyword heuristic used when no classifier is configured or the classifier
//! fails.
//!
//! Every task gets a "phase": the minimum phase over all keywords that occur
//! (as plain substrings) in its lowercased name and description, or
//! [`DEFAULT_PHASE`] when nothing matches. A task depends on **every** task
//! with a strictly lower phase, so tasks in different phases form a clique
//! and tasks sharing a phase are unordered relative to each other.

use tracing::debug;

use crate::model::Task;
use crate::resolve::relation::PrerequisiteRelation;

/// Phase for tasks that match no keyword (mid-pipeline).
pub const DEFAULT_PHASE: u8 = 5;

/// Ordered action keywords and their phase; lower phases come first.
pub const PHASE_KEYWORDS: &[(&str, u8)] = &[
    // planning
    ("start", 1),
    ("begin", 1),
    ("plan", 1),
    ("think", 1),
    // research
    ("research", 2),
    ("analyze", 2),
    ("study", 2),
    ("learn", 2),
    ("gather", 2),
    ("collect", 2),
    // design
    ("design", 3),
    ("design mockup", 3),
    ("sketch", 3),
    ("blueprint", 3),
    // implementation
    ("write", 4),
    ("code", 4),
    ("implement", 4),
    ("build", 4),
    ("develop", 4),
    ("prepare", 4),
    ("cook", 4),
    // arrangement
    ("set", 5),
    ("arrange", 5),
    // review
    ("test", 6),
    ("review", 6),
    ("check", 6),
    ("quality", 6),
    // publishing
    ("submit", 7),
    ("publish", 7),
    ("launch", 7),
    ("deploy", 7),
    ("turn in", 7),
    // consumption
    ("eat", 8),
    ("enjoy", 8),
    ("use", 8),
    ("market", 9),
    // rest
    ("sleep", 10),
    ("rest", 10),
    ("relax", 10),
];

/// Phase of a single task.
pub fn phase_of(task: &Task) -> u8 {
    phase_of_text(&task.search_text())
}

/// Phase of already-lowercased text.
pub fn phase_of_text(text: &str) -> u8 {
    PHASE_KEYWORDS
        .iter()
        .filter(|(keyword, _)| text.contains(keyword))
        .map(|&(_, phase)| phase)
        .min()
        .unwrap_or(DEFAULT_PHASE)
}

/// Build the clique relation: `i` depends on `j` iff `phase(j) < phase(i)`.
pub fn keyword_relation(tasks: &[Task]) -> PrerequisiteRelation {
    let phases: Vec<u8> = tasks.iter().map(phase_of).collect();
    debug!(?phases, "keyword phases assigned");

    let mut relation = PrerequisiteRelation::empty(tasks.len());
    for (i, &phase_i) in phases.iter().enumerate() {
        for (j, &phase_j) in phases.iter().enumerate() {
            if i != j && phase_j < phase_i {
                relation.add(i, j);
            }
        }
    }
    relation
}
