// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, TaskplanError};
use crate::store::{MAX_PRIORITY, MIN_PRIORITY};

/// Upper bound for the simulated per-task delay (one hour).
const MAX_STEP_DELAY_MS: u64 = 60 * 60 * 1000;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = TaskplanError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.execution, raw.classifier, raw.task))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_execution(cfg)?;
    validate_classifier(cfg)?;
    validate_tasks(cfg)?;
    Ok(())
}

fn validate_execution(cfg: &RawConfigFile) -> Result<()> {
    if cfg.execution.step_delay_ms > MAX_STEP_DELAY_MS {
        return Err(TaskplanError::ConfigError(format!(
            "[execution].step_delay_ms must be <= {MAX_STEP_DELAY_MS} (got {})",
            cfg.execution.step_delay_ms
        )));
    }
    Ok(())
}

fn validate_classifier(cfg: &RawConfigFile) -> Result<()> {
    let c = &cfg.classifier;
    if !c.enabled {
        return Ok(());
    }
    if c.base_url.trim().is_empty() {
        return Err(TaskplanError::ConfigError(
            "[classifier].base_url must not be empty when the classifier is enabled".to_string(),
        ));
    }
    if c.model.trim().is_empty() {
        return Err(TaskplanError::ConfigError(
            "[classifier].model must not be empty when the classifier is enabled".to_string(),
        ));
    }
    if c.timeout_secs == 0 {
        return Err(TaskplanError::ConfigError(
            "[classifier].timeout_secs must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_tasks(cfg: &RawConfigFile) -> Result<()> {
    for (i, task) in cfg.task.iter().enumerate() {
        if task.name.trim().is_empty() {
            return Err(TaskplanError::ConfigError(format!(
                "task #{} has an empty name",
                i + 1
            )));
        }
        if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&task.priority) {
            return Err(TaskplanError::ConfigError(format!(
                "task '{}' has priority {} (expected {MIN_PRIORITY}..={MAX_PRIORITY})",
                task.name, task.priority
            )));
        }
    }
    Ok(())
}
