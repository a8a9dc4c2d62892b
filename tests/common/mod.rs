#![allow(dead_code)]

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

use taskplan::model::Task;
use taskplan_test_utils::builders::tasks_named;

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// Logs are captured per-test and only shown for failures (or with
/// `-- --nocapture`). Enable levels with e.g. `RUST_LOG=debug cargo test`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Research -> Write -> Submit, the canonical three-step chain.
pub fn research_write_submit() -> Vec<Task> {
    tasks_named(&["Research topic", "Write report", "Submit report"])
}
