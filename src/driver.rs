// src/driver.rs

//! Terminal driver: prints the analysis, runs tasks through the timed
//! execution step and asks the user for decisions on stdin.
//!
//! This is a consumer of the engine like any other front end; it only uses
//! the public [`Engine`] surface.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::dag::{Infeasibility, Outcome};
use crate::engine::{
    Decision, DecisionSource, Engine, ExecutionOptions, RunOutcome, TimerExpired,
    run_and_await_outcome,
};
use crate::errors::Result;
use crate::report::ProductivityReport;
use crate::types::TaskId;

/// Human-readable reason for an infeasible query.
pub fn describe_infeasibility(reason: Infeasibility) -> String {
    match reason {
        Infeasibility::NoTasks => "no tasks defined".to_string(),
        Infeasibility::Cyclic { task } => {
            format!("dependencies are cyclic (cycle reachable through task {task})")
        }
        Infeasibility::NoPath { from, to } => format!("no path from task {from} to task {to}"),
    }
}

/// Print order, critical path, optional shortest path and report.
pub fn print_analysis(engine: &Engine, query: Option<(TaskId, TaskId)>) -> Result<()> {
    println!("project: {}", engine.project_name());
    println!();

    println!("tasks:");
    for task in engine.tasks() {
        let deps: Vec<TaskId> = task.dependencies.iter().copied().collect();
        if deps.is_empty() {
            println!("  {:>3}  {} ({} min)", task.id, task.name, task.planned_duration);
        } else {
            println!(
                "  {:>3}  {} ({} min) after {:?}",
                task.id, task.name, task.planned_duration, deps
            );
        }
    }
    println!();

    match engine.topological_order() {
        Outcome::Ready(order) => {
            println!("execution order: {}", join_names(engine, &order));
        }
        Outcome::Infeasible(reason) => {
            println!("execution order: cannot compute: {}", describe_infeasibility(reason));
        }
    }

    match engine.critical_path() {
        Outcome::Ready(path) => {
            println!(
                "critical path: {} (length {} min)",
                join_names(engine, &path.tasks),
                path.total
            );
        }
        Outcome::Infeasible(reason) => {
            println!("critical path: cannot compute: {}", describe_infeasibility(reason));
        }
    }

    if let Some((from, to)) = query {
        match engine.shortest_path(from, to)? {
            Outcome::Ready(path) => {
                println!(
                    "shortest path {from} -> {to}: {} (total weight {})",
                    join_names(engine, &path.tasks),
                    path.total
                );
            }
            Outcome::Infeasible(reason) => {
                println!(
                    "shortest path {from} -> {to}: {}",
                    describe_infeasibility(reason)
                );
            }
        }
    }

    println!();
    print_report(&engine.productivity_report());
    Ok(())
}

pub fn print_report(report: &ProductivityReport) {
    println!("productivity report:");
    for entry in &report.entries {
        println!(
            "  {:>3}  {:<20} planned {:>6} min  actual {:>6} min  {:>6.1}%",
            entry.task_id, entry.task_name, entry.planned_time, entry.actual_time, entry.productivity
        );
    }
    println!("  overall productivity: {:.1}%", report.overall_productivity);
}

fn join_names(engine: &Engine, path: &[TaskId]) -> String {
    engine
        .names_along(path)
        .into_iter()
        .zip(path)
        .map(|(name, id)| format!("{id}:{name}"))
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Unfinished tasks in topological order, or the reason there is none.
pub fn execution_targets(engine: &Engine) -> std::result::Result<Vec<TaskId>, Infeasibility> {
    match engine.topological_order() {
        Outcome::Ready(order) => {
            let unfinished = engine.unfinished();
            Ok(order
                .into_iter()
                .filter(|id| unfinished.contains(id))
                .collect())
        }
        Outcome::Infeasible(reason) => Err(reason),
    }
}

/// Run `targets` one after another through the timed execution step.
///
/// Stops at the first cancelled run, or when `shutdown` flips to `true`.
pub async fn execute<D>(
    engine: &Engine,
    targets: &[TaskId],
    decisions: &mut D,
    mut shutdown: watch::Receiver<bool>,
    options: ExecutionOptions,
) -> Result<Vec<(TaskId, RunOutcome)>>
where
    D: DecisionSource + ?Sized,
{
    let mut outcomes = Vec::with_capacity(targets.len());

    for &task in targets {
        let (cancel_tx, cancel_rx) = oneshot::channel();
        let run = run_and_await_outcome(engine, task, decisions, cancel_rx, options);
        tokio::pin!(run);

        let outcome = tokio::select! {
            outcome = &mut run => outcome?,
            _ = shutdown_signalled(&mut shutdown) => {
                info!(task, "shutdown requested; cancelling current task");
                let _ = cancel_tx.send(());
                run.await?
            }
        };

        let cancelled = outcome == RunOutcome::Cancelled;
        outcomes.push((task, outcome));
        if cancelled {
            warn!(task, "execution stopped before task completed");
            break;
        }
    }

    Ok(outcomes)
}

async fn shutdown_signalled(rx: &mut watch::Receiver<bool>) {
    if rx.wait_for(|stop| *stop).await.is_err() {
        std::future::pending::<()>().await;
    }
}

/// Answer prompts from stdin: `done <minutes>` or `delay <minutes>`.
///
/// End of input drops the decision sender, which cancels the pending run.
pub fn spawn_terminal_prompter(
    prompts: mpsc::Receiver<TimerExpired>,
    decisions: mpsc::Sender<Decision>,
) -> JoinHandle<()> {
    spawn_prompter(BufReader::new(tokio::io::stdin()), prompts, decisions)
}

/// Answer prompts from any line-oriented input. Lines that do not parse
/// as a [`Decision`] are reported and the same prompt is asked again.
pub fn spawn_prompter<R>(
    input: R,
    mut prompts: mpsc::Receiver<TimerExpired>,
    decisions: mpsc::Sender<Decision>,
) -> JoinHandle<()>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = input.lines();

        while let Some(prompt) = prompts.recv().await {
            println!(
                "Time is up for task {} ({}, planned {} min). Completed? [done <actual minutes> | delay <minutes>]",
                prompt.task, prompt.name, prompt.planned_duration
            );

            let decision = loop {
                match lines.next_line().await {
                    Ok(Some(line)) => match line.parse::<Decision>() {
                        Ok(decision) => break Some(decision),
                        Err(e) => println!("{e}"),
                    },
                    Ok(None) => break None,
                    Err(e) => {
                        warn!(error = %e, "failed to read answer");
                        break None;
                    }
                }
            };

            let Some(decision) = decision else {
                debug!("input closed; no more decisions");
                return;
            };

            if decisions.send(decision).await.is_err() {
                return;
            }
        }
    })
}
