// tests/app_state.rs

mod common;
use crate::common::init_tracing;

use std::error::Error;
use std::time::Duration;

use taskplan::app::AppState;
use taskplan::errors::TaskplanError;
use taskplan::exec::ExecutionController;
use taskplan::model::{TaskId, TaskStatus};
use taskplan::resolve::DependencyResolver;
use taskplan::types::SessionPhase;
use taskplan_test_utils::builders::ConfigFileBuilder;

type TestResult = Result<(), Box<dyn Error>>;

fn keyword_app() -> AppState {
    AppState::new(
        DependencyResolver::keywords_only(),
        ExecutionController::new(Duration::from_millis(50)),
    )
}

#[test]
fn submit_validates_name_and_priority() {
    let mut app = keyword_app();

    assert!(matches!(app.submit("   ", "", 5), Err(TaskplanError::InvalidTask(_))));
    assert!(matches!(app.submit("Write", "", 0), Err(TaskplanError::InvalidTask(_))));
    assert!(matches!(app.submit("Write", "", 11), Err(TaskplanError::InvalidTask(_))));

    let a = app.submit("  Write report ", " draft ", 10).unwrap();
    let b = app.submit("Submit report", "", 1).unwrap();
    assert_ne!(a, b);
    assert_eq!(a, TaskId::new("task_0"));

    let tasks = app.tasks();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].name, "Write report");
    assert_eq!(tasks[0].description, "draft");
    assert_eq!(tasks[0].status, TaskStatus::Pending);
}

#[test]
fn task_identity_is_by_id_only() {
    let mut app = keyword_app();
    let id = app.submit("Write report", "", 5).unwrap();

    let mut copy = app.tasks()[0].clone();
    copy.name = "Renamed".to_string();
    copy.status = TaskStatus::Completed;
    assert_eq!(copy, app.tasks()[0]);
    assert_eq!(copy.id, id);
}

#[tokio::test]
async fn changing_tasks_discards_the_plan() -> TestResult {
    let mut app = keyword_app();
    let research = app.submit("Research topic", "", 5)?;
    app.submit("Write report", "", 5)?;

    app.generate_plan().await?;
    assert!(app.current_plan().is_some());
    assert!(!app.reasoning().is_empty());

    app.delete(&research)?;
    assert!(app.current_plan().is_none());
    assert!(app.reasoning().is_empty());

    app.generate_plan().await?;
    app.submit("Submit report", "", 5)?;
    assert!(app.current_plan().is_none());

    assert!(matches!(
        app.delete(&TaskId::new("missing")),
        Err(TaskplanError::TaskNotFound(_))
    ));
    Ok(())
}

#[tokio::test]
async fn execute_without_plan_is_invalid_start() {
    let mut app = keyword_app();
    app.submit("Write report", "", 5).unwrap();

    assert!(matches!(app.execute(), Err(TaskplanError::InvalidPlanStart(_))));
    assert!(!app.is_executing());
}

#[tokio::test(start_paused = true)]
async fn full_flow_plans_and_executes() -> TestResult {
    init_tracing();

    let cfg = ConfigFileBuilder::new()
        .without_classifier()
        .with_step_delay_ms(25)
        .with_task("Submit report", "", 5)
        .with_task("Write report", "", 5)
        .with_task("Research topic", "", 5)
        .build();
    let mut app = AppState::from_config(&cfg, DependencyResolver::from_config(&cfg.classifier))?;
    assert_eq!(app.controller().step_delay(), Duration::from_millis(25));

    let plan = app.generate_plan().await?;
    assert!(plan.is_valid());
    assert_eq!(
        plan.ordered_names(),
        vec!["Research topic", "Write report", "Submit report"]
    );

    app.execute()?;
    assert!(app.is_executing());

    // Task list is locked while executing.
    let first = app.tasks()[0].id.clone();
    assert!(matches!(app.delete(&first), Err(TaskplanError::SessionActive)));
    assert!(matches!(app.clear(), Err(TaskplanError::SessionActive)));
    assert!(matches!(app.generate_plan().await, Err(TaskplanError::SessionActive)));

    let report = app.wait().await?.expect("a session was started");
    assert_eq!(report.phase, SessionPhase::Completed);
    assert!(report.tasks.iter().all(|t| t.status == TaskStatus::Completed));
    assert_eq!(app.snapshot().progress(), (3, 3));

    // The store's own records are untouched by execution.
    assert!(app.tasks().iter().all(|t| t.status == TaskStatus::Pending));

    app.clear()?;
    assert!(app.tasks().is_empty());
    Ok(())
}

#[tokio::test]
async fn cyclic_plan_cannot_be_executed() -> TestResult {
    use std::sync::Arc;
    use taskplan_test_utils::fake_classifier::StaticClassifier;

    let resolver = DependencyResolver::with_classifier(Arc::new(StaticClassifier::new(
        r#"{"dependencies": {"1": [2], "2": [1]}}"#,
    )));
    let mut app = AppState::new(resolver, ExecutionController::new(Duration::from_millis(10)));
    app.submit("Wash dishes", "", 5)?;
    app.submit("Dry dishes", "", 5)?;

    let plan = app.generate_plan().await?;
    assert!(!plan.is_valid());

    match app.execute() {
        Err(TaskplanError::InvalidPlanStart(msg)) => assert!(msg.contains("Circular dependency")),
        other => panic!("expected InvalidPlanStart, got {other:?}"),
    }
    Ok(())
}
