#![allow(dead_code)]

use taskplan::config::{ConfigFile, RawConfigFile, TaskEntry};
use taskplan::model::{Task, TaskId};

/// Build tasks named `names`, with empty descriptions and ids `task_<i>`.
pub fn tasks_named(names: &[&str]) -> Vec<Task> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| TaskBuilder::new(name).id(&format!("task_{i}")).build())
        .collect()
}

/// Build tasks from `(name, description)` pairs, with ids `task_<i>`.
pub fn tasks_described(entries: &[(&str, &str)]) -> Vec<Task> {
    entries
        .iter()
        .enumerate()
        .map(|(i, (name, description))| {
            TaskBuilder::new(name)
                .id(&format!("task_{i}"))
                .description(description)
                .build()
        })
        .collect()
}

/// Builder for a single `Task`.
pub struct TaskBuilder {
    id: String,
    name: String,
    description: String,
    priority: u8,
}

impl TaskBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            id: name.to_lowercase().replace(' ', "_"),
            name: name.to_string(),
            description: String::new(),
            priority: 5,
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    pub fn build(self) -> Task {
        Task::new(TaskId::new(self.id), self.name, self.description, self.priority)
    }
}

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn with_task(mut self, name: &str, description: &str, priority: u8) -> Self {
        self.config.task.push(TaskEntry {
            name: name.to_string(),
            description: description.to_string(),
            priority,
        });
        self
    }

    pub fn with_step_delay_ms(mut self, ms: u64) -> Self {
        self.config.execution.step_delay_ms = ms;
        self
    }

    pub fn without_classifier(mut self) -> Self {
        self.config.classifier.enabled = false;
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
