// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskplanError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid task: {0}")]
    InvalidTask(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Cannot start execution: {0}")]
    InvalidPlanStart(String),

    #[error("An execution session is already active")]
    SessionActive,

    #[error("Circular dependency detected among tasks: {0}")]
    DagCycle(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Failures of the semantic classifier.
///
/// These never leave the resolver: every variant is logged and answered with
/// the keyword heuristic instead.
#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("classifier unavailable: {0}")]
    Unavailable(String),

    #[error("classifier response invalid: {0}")]
    ResponseInvalid(String),
}

impl From<reqwest::Error> for ClassifierError {
    fn from(err: reqwest::Error) -> Self {
        ClassifierError::Unavailable(err.to_string())
    }
}

impl From<serde_json::Error> for ClassifierError {
    fn from(err: serde_json::Error) -> Self {
        ClassifierError::ResponseInvalid(err.to_string())
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, TaskplanError>;
