// src/resolve/http.rs

//! Classifier backed by an OpenAI-compatible chat-completions endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::config::model::ClassifierSection;
use crate::errors::ClassifierError;
use crate::resolve::classifier::{ClassifierResponse, ClassifierTask, DependencyClassifier};

const TEMPERATURE: f32 = 0.3;

pub struct HttpClassifier {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl std::fmt::Debug for HttpClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClassifier")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl HttpClassifier {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClassifierError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url, model, api_key))
    }

    /// Use a preconfigured client (proxy, TLS or timeout settings).
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    /// Build from the `[classifier]` section, reading the key from the
    /// configured environment variable.
    ///
    /// Returns `Ok(None)` when the classifier is disabled or the key is
    /// not set.
    pub fn from_config(cfg: &ClassifierSection) -> Result<Option<Self>, ClassifierError> {
        if !cfg.enabled {
            return Ok(None);
        }
        let api_key = match std::env::var(&cfg.api_key_env) {
            Ok(key) if !key.trim().is_empty() => key,
            _ => return Ok(None),
        };
        Self::new(
            cfg.base_url.clone(),
            cfg.model.clone(),
            api_key,
            Duration::from_secs(cfg.timeout_secs),
        )
        .map(Some)
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl DependencyClassifier for HttpClassifier {
    fn name(&self) -> &str {
        &self.model
    }

    async fn classify(
        &self,
        tasks: &[ClassifierTask],
    ) -> Result<ClassifierResponse, ClassifierError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": build_prompt(tasks) }],
            "temperature": TEMPERATURE,
        });

        debug!(url = %self.endpoint(), model = %self.model, tasks = tasks.len(), "sending classifier request");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassifierError::Unavailable(format!(
                "classifier returned HTTP {status}"
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| ClassifierError::ResponseInvalid(e.to_string()))?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ClassifierError::ResponseInvalid("no choices in response".to_string()))?;

        ClassifierResponse::from_json(extract_json(&content))
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: String,
}

/// Prompt asking for prerequisite indices as JSON.
pub fn build_prompt(tasks: &[ClassifierTask]) -> String {
    let listing = tasks
        .iter()
        .map(|t| format!("{}. {}: {}", t.index, t.name, t.description))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Analyze the following tasks and determine their PREREQUISITE dependencies.
For each task, identify which OTHER tasks must be completed BEFORE it can be started.

Tasks:
{listing}

Return ONLY valid JSON in this format (no other text):
{{
  "dependencies": {{
    "1": [],
    "2": [1],
    "3": [1, 2]
  }}
}}

Where:
- The key is the task number (1-based)
- The value is a list of task numbers that must be completed BEFORE this task
- An empty list means no prerequisites

Only include task numbers between 1 and {count}"#,
        count = tasks.len()
    )
}

/// Models sometimes wrap JSON in a fenced block; take the inside if so.
pub fn extract_json(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
