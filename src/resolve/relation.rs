// src/resolve/relation.rs

use std::collections::BTreeSet;

use tracing::warn;

/// For each task index, the set of task indices that must complete first.
///
/// All stored indices are within `[0, len)`; [`PrerequisiteRelation::add`]
/// refuses anything else.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PrerequisiteRelation {
    prereqs: Vec<BTreeSet<usize>>,
}

impl PrerequisiteRelation {
    /// A relation over `len` tasks with no prerequisites at all.
    pub fn empty(len: usize) -> Self {
        Self {
            prereqs: vec![BTreeSet::new(); len],
        }
    }

    /// Build from explicit per-task lists. Out-of-range entries are dropped.
    pub fn from_lists(lists: Vec<Vec<usize>>) -> Self {
        let mut rel = Self::empty(lists.len());
        for (task, list) in lists.into_iter().enumerate() {
            for prereq in list {
                rel.add(task, prereq);
            }
        }
        rel
    }

    /// Record that `prereq` must complete before `task`.
    ///
    /// Returns `false` (and records nothing) if either index is out of range.
    pub fn add(&mut self, task: usize, prereq: usize) -> bool {
        let len = self.prereqs.len();
        if task >= len || prereq >= len {
            warn!(task, prereq, len, "ignoring out-of-range prerequisite");
            return false;
        }
        self.prereqs[task].insert(prereq);
        true
    }

    pub fn len(&self) -> usize {
        self.prereqs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prereqs.is_empty()
    }

    /// Prerequisites of `task`; empty for unknown indices.
    pub fn prerequisites_of(&self, task: usize) -> &BTreeSet<usize> {
        static NONE: BTreeSet<usize> = BTreeSet::new();
        self.prereqs.get(task).unwrap_or(&NONE)
    }

    pub fn depends_on(&self, task: usize, prereq: usize) -> bool {
        self.prerequisites_of(task).contains(&prereq)
    }

    /// Iterate `(task, prerequisites)` in ascending task order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &BTreeSet<usize>)> {
        self.prereqs.iter().enumerate()
    }

    /// Total number of prerequisite edges.
    pub fn edge_count(&self) -> usize {
        self.prereqs.iter().map(BTreeSet::len).sum()
    }
}
