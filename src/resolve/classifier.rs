// src/resolve/classifier.rs

//! The semantic classifier seam.
//!
//! A classifier receives the tasks as `{index (1-based), name, description}`
//! and answers with, per 1-based index, the 1-based indices that must come
//! first:
//!
//! ```json
//! { "dependencies": { "1": [], "2": [1], "3": [1, 2] } }
//! ```

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::ClassifierError;
use crate::model::Task;
use crate::resolve::relation::PrerequisiteRelation;

/// One entry of a classifier request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifierTask {
    /// 1-based position in the task list.
    pub index: usize,
    pub name: String,
    pub description: String,
}

impl ClassifierTask {
    /// Serialize a task list into classifier request entries.
    pub fn from_tasks(tasks: &[Task]) -> Vec<Self> {
        tasks
            .iter()
            .enumerate()
            .map(|(i, t)| ClassifierTask {
                index: i + 1,
                name: t.name.clone(),
                description: t.description.clone(),
            })
            .collect()
    }
}

/// Classifier answer. A missing `dependencies` field means "no
/// prerequisites anywhere".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClassifierResponse {
    #[serde(default)]
    pub dependencies: BTreeMap<String, Vec<i64>>,
}

impl ClassifierResponse {
    /// Parse a JSON payload.
    pub fn from_json(payload: &str) -> Result<Self, ClassifierError> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Convert to a 0-based relation over `len` tasks.
    ///
    /// Keys must be exactly the decimal 1-based index (`"2"`, not `"02"` or
    /// `" 2"`); anything else is ignored. Values outside `[1, len]` are
    /// dropped. Missing keys mean no prerequisites.
    pub fn into_relation(mut self, len: usize) -> PrerequisiteRelation {
        let mut relation = PrerequisiteRelation::empty(len);

        for task in 0..len {
            let Some(prereqs) = self.dependencies.remove(&(task + 1).to_string()) else {
                continue;
            };
            for p in prereqs {
                if p >= 1 && (p as u64) <= len as u64 {
                    relation.add(task, p as usize - 1);
                }
            }
        }

        if !self.dependencies.is_empty() {
            let ignored: Vec<&String> = self.dependencies.keys().collect();
            debug!(?ignored, "ignoring classifier keys that are not task indices");
        }

        relation
    }
}

/// Capability that infers prerequisites semantically.
///
/// Injected into [`DependencyResolver`](crate::resolve::DependencyResolver)
/// at construction time; tests substitute fakes.
#[async_trait]
pub trait DependencyClassifier: Send + Sync {
    /// Short name for logs and the reasoning trace.
    fn name(&self) -> &str;

    async fn classify(
        &self,
        tasks: &[ClassifierTask],
    ) -> Result<ClassifierResponse, ClassifierError>;
}
