// src/config/model.rs

use std::time::Duration;

use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [execution]
/// step_delay_ms = 1500
///
/// [classifier]
/// enabled = true
/// model = "gpt-3.5-turbo"
///
/// [[task]]
/// name = "Research topic"
/// description = "Find three sources"
/// priority = 7
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub execution: ExecutionSection,

    #[serde(default)]
    pub classifier: ClassifierSection,

    /// Tasks from `[[task]]`, in file order.
    #[serde(default)]
    pub task: Vec<TaskEntry>,
}

/// Validated configuration. Construct via `TryFrom<RawConfigFile>`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub execution: ExecutionSection,
    pub classifier: ClassifierSection,
    pub task: Vec<TaskEntry>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        execution: ExecutionSection,
        classifier: ClassifierSection,
        task: Vec<TaskEntry>,
    ) -> Self {
        Self {
            execution,
            classifier,
            task,
        }
    }
}

/// `[execution]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecutionSection {
    /// Simulated duration of every task, in milliseconds.
    #[serde(default = "default_step_delay_ms")]
    pub step_delay_ms: u64,
}

fn default_step_delay_ms() -> u64 {
    1500
}

impl ExecutionSection {
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }
}

impl Default for ExecutionSection {
    fn default() -> Self {
        Self {
            step_delay_ms: default_step_delay_ms(),
        }
    }
}

/// `[classifier]` section: the optional semantic dependency classifier.
///
/// The classifier is only used when `enabled` is true **and** the variable
/// named by `api_key_env` is set.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierSection {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_enabled() -> bool {
    true
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ClassifierSection {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            base_url: default_base_url(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// One `[[task]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskEntry {
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default = "default_priority")]
    pub priority: u8,
}

fn default_priority() -> u8 {
    5
}
