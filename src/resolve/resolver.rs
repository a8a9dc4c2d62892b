// src/resolve/resolver.rs

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::model::ClassifierSection;
use crate::model::Task;
use crate::resolve::classifier::{ClassifierTask, DependencyClassifier};
use crate::resolve::http::HttpClassifier;
use crate::resolve::keywords::keyword_relation;
use crate::resolve::relation::PrerequisiteRelation;
use crate::types::ResolutionSource;

/// Result of a resolution: the relation plus which path produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub relation: PrerequisiteRelation,
    pub source: ResolutionSource,
}

/// Maps a task list to a prerequisite relation.
///
/// With a classifier injected, the classifier is asked first; any failure
/// is logged at `warn` and answered with the keyword heuristic. Without
/// one, the keyword heuristic is used directly. Resolution never fails.
#[derive(Clone, Default)]
pub struct DependencyResolver {
    classifier: Option<Arc<dyn DependencyClassifier>>,
}

impl std::fmt::Debug for DependencyResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependencyResolver")
            .field("classifier", &self.classifier.as_ref().map(|c| c.name().to_string()))
            .finish()
    }
}

impl DependencyResolver {
    /// Resolver that only uses the keyword heuristic.
    pub fn keywords_only() -> Self {
        Self { classifier: None }
    }

    pub fn with_classifier(classifier: Arc<dyn DependencyClassifier>) -> Self {
        Self {
            classifier: Some(classifier),
        }
    }

    /// Select the resolution strategy from the `[classifier]` section.
    pub fn from_config(cfg: &ClassifierSection) -> Self {
        match HttpClassifier::from_config(cfg) {
            Ok(Some(classifier)) => {
                info!(model = %cfg.model, base_url = %cfg.base_url, "semantic classifier enabled");
                Self::with_classifier(Arc::new(classifier))
            }
            Ok(None) => {
                info!(
                    enabled = cfg.enabled,
                    api_key_env = %cfg.api_key_env,
                    "semantic classifier not configured; using keyword heuristic"
                );
                Self::keywords_only()
            }
            Err(err) => {
                warn!(error = %err, "could not initialise semantic classifier; using keyword heuristic");
                Self::keywords_only()
            }
        }
    }

    pub fn has_classifier(&self) -> bool {
        self.classifier.is_some()
    }

    /// Compute the prerequisite relation for `tasks`.
    pub async fn resolve(&self, tasks: &[Task]) -> Resolution {
        if tasks.len() <= 1 {
            return Resolution {
                relation: PrerequisiteRelation::empty(tasks.len()),
                source: ResolutionSource::Trivial,
            };
        }

        if let Some(classifier) = &self.classifier {
            let request = ClassifierTask::from_tasks(tasks);
            match classifier.classify(&request).await {
                Ok(response) => {
                    let relation = response.into_relation(tasks.len());
                    debug!(
                        classifier = %classifier.name(),
                        edges = relation.edge_count(),
                        "classifier resolved dependencies"
                    );
                    return Resolution {
                        relation,
                        source: ResolutionSource::Classifier,
                    };
                }
                Err(err) => {
                    warn!(
                        classifier = %classifier.name(),
                        error = %err,
                        "classifier failed; falling back to keyword heuristic"
                    );
                }
            }
        }

        Resolution {
            relation: self.resolve_with_keywords(tasks),
            source: ResolutionSource::Keywords,
        }
    }

    /// The keyword heuristic alone, regardless of any classifier.
    pub fn resolve_with_keywords(&self, tasks: &[Task]) -> PrerequisiteRelation {
        let relation = keyword_relation(tasks);
        debug!(edges = relation.edge_count(), "keyword heuristic resolved dependencies");
        relation
    }
}
