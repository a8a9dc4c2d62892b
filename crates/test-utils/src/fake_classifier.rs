use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use taskplan::errors::ClassifierError;
use taskplan::resolve::{ClassifierResponse, ClassifierTask, DependencyClassifier};

/// A fake classifier that:
/// - records every request it receives
/// - answers with a fixed JSON payload (parsed on each call, so a malformed
///   payload produces `ResponseInvalid` just like the HTTP classifier).
pub struct StaticClassifier {
    payload: String,
    requests: Arc<Mutex<Vec<Vec<ClassifierTask>>>>,
}

impl StaticClassifier {
    pub fn new(payload: &str) -> Self {
        Self {
            payload: payload.to_string(),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared handle to the recorded requests.
    pub fn requests(&self) -> Arc<Mutex<Vec<Vec<ClassifierTask>>>> {
        Arc::clone(&self.requests)
    }
}

#[async_trait]
impl DependencyClassifier for StaticClassifier {
    fn name(&self) -> &str {
        "static"
    }

    async fn classify(
        &self,
        tasks: &[ClassifierTask],
    ) -> Result<ClassifierResponse, ClassifierError> {
        self.requests.lock().unwrap().push(tasks.to_vec());
        ClassifierResponse::from_json(&self.payload)
    }
}

/// A fake classifier that always fails as if the transport were down.
#[derive(Default)]
pub struct UnavailableClassifier {
    calls: Arc<AtomicUsize>,
}

impl UnavailableClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl DependencyClassifier for UnavailableClassifier {
    fn name(&self) -> &str {
        "unavailable"
    }

    async fn classify(
        &self,
        _tasks: &[ClassifierTask],
    ) -> Result<ClassifierResponse, ClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ClassifierError::Unavailable(
            "connection refused (simulated)".to_string(),
        ))
    }
}
