// src/resolve/mod.rs

//! Dependency inference: task list -> prerequisite relation.
//!
//! - [`relation`] holds the [`PrerequisiteRelation`] type.
//! - [`keywords`] is the deterministic phase-keyword heuristic.
//! - [`classifier`] defines the [`DependencyClassifier`] seam and its
//!   request/response contract.
//! - [`http`] is the production classifier talking to a chat-completions
//!   endpoint.
//! - [`resolver`] picks between the two and absorbs classifier failures.

pub mod classifier;
pub mod http;
pub mod keywords;
pub mod relation;
pub mod resolver;

pub use classifier::{ClassifierResponse, ClassifierTask, DependencyClassifier};
pub use http::HttpClassifier;
pub use keywords::{keyword_relation, phase_of, DEFAULT_PHASE};
pub use relation::PrerequisiteRelation;
pub use resolver::{DependencyResolver, Resolution};
