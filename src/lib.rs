// src/lib.rs

pub mod app;
pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod model;
pub mod plan;
pub mod resolve;
pub mod store;
pub mod types;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use tracing::{debug, info, warn};

use crate::app::AppState;
use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::exec::ExecutionSnapshot;
use crate::model::{ExecutionPlan, TaskStatus};
use crate::resolve::DependencyResolver;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - resolver selection (classifier or keyword heuristic)
/// - plan generation and printing
/// - execution with progress output
/// - Ctrl-C handling (stops the session)
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let mut cfg = load_and_validate(&config_path)?;

    if let Some(ms) = args.step_delay_ms {
        debug!(step_delay_ms = ms, "step delay overridden on command line");
        cfg.execution.step_delay_ms = ms;
    }

    let resolver = if args.keywords_only {
        info!("--keywords-only given; semantic classifier disabled");
        DependencyResolver::keywords_only()
    } else {
        DependencyResolver::from_config(&cfg.classifier)
    };

    let mut state = AppState::from_config(&cfg, resolver)?;
    if state.tasks().is_empty() {
        println!("No tasks to execute.");
        return Ok(());
    }

    let plan = state.generate_plan().await?;
    let valid = plan.is_valid();
    print_plan(plan);
    print_reasoning(state.reasoning());

    if !valid {
        return Err(anyhow!(
            "invalid plan: {}",
            state
                .current_plan()
                .and_then(ExecutionPlan::error_message)
                .unwrap_or("unknown error")
        ));
    }

    if args.dry_run {
        debug!("dry-run complete (no execution)");
        return Ok(());
    }

    execute_with_progress(&mut state).await
}

/// Start the current plan and print status changes until the session ends.
async fn execute_with_progress(state: &mut AppState) -> Result<()> {
    let mut status_rx = state.subscribe();
    let session = state.execute()?;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut stop_sent = false;
    let mut printed: Vec<TaskStatus> = Vec::new();

    println!();
    println!("executing plan:");

    loop {
        tokio::select! {
            res = &mut ctrl_c, if !stop_sent => {
                if let Err(e) = res {
                    warn!(error = %e, "failed to listen for Ctrl+C");
                } else {
                    info!("Ctrl+C received; stopping execution");
                    state.stop();
                }
                stop_sent = true;
            }
            changed = status_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = status_rx.borrow_and_update().clone();
                if snapshot.session != session {
                    continue;
                }
                print_changes(&snapshot, &mut printed);
                if snapshot.phase.is_terminal() {
                    break;
                }
            }
        }
    }

    let report = state
        .wait()
        .await?
        .ok_or_else(|| anyhow!("execution session vanished"))?;

    let completed = report
        .tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Completed)
        .count();
    println!();
    println!(
        "session {} {:?}: {}/{} task(s) completed",
        report.session,
        report.phase,
        completed,
        report.tasks.len()
    );

    Ok(())
}

fn print_plan(plan: &ExecutionPlan) {
    if !plan.is_valid() {
        println!(
            "invalid plan: {}",
            plan.error_message().unwrap_or("unknown error")
        );
        return;
    }

    println!("planned execution order ({} task(s)):", plan.len());
    for (i, task) in plan.ordered_tasks().into_iter().enumerate() {
        println!("  {}. {} (priority {})", i + 1, task.name, task.priority);
        if !task.description.is_empty() {
            println!("      {}", task.description);
        }
    }
}

fn print_reasoning(trace: &[String]) {
    println!();
    println!("reasoning:");
    for line in trace {
        for part in line.lines() {
            println!("  {part}");
        }
    }
}

/// Print tasks whose status differs from what was printed last time.
fn print_changes(snapshot: &ExecutionSnapshot, printed: &mut Vec<TaskStatus>) {
    printed.resize(snapshot.tasks.len(), TaskStatus::Pending);
    let (completed, total) = snapshot.progress();

    for (i, task) in snapshot.tasks.iter().enumerate() {
        if printed[i] != task.status {
            println!(
                "  [{completed}/{total}] {:<9} {}",
                task.status.to_string(),
                task.name
            );
            printed[i] = task.status;
        }
    }
}
