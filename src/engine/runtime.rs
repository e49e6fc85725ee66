// src/engine/runtime.rs

//! Timed execution of a single task.
//!
//! Two phases per round: sleep for the planned duration, then wait for a
//! [`Decision`]. A delay extends the task and starts another round. Neither
//! phase holds the engine lock, so other callers can keep querying the
//! engine while a task is being waited on.

use tokio::sync::oneshot;
use tracing::{debug, info};

use crate::engine::decision::DecisionSource;
use crate::engine::handle::Engine;
use crate::engine::{Decision, ExecutionOptions, RunOutcome, TimerExpired};
use crate::errors::{Result, TaskplanError};
use crate::types::TaskId;

/// Run `task` until it is completed or cancelled.
///
/// - If `cancel` fires (or `decisions` reports [`TaskplanError::Cancelled`])
///   before a decision is applied, the task keeps its current state and no
///   completion record is written.
/// - Dropping the `cancel` sender without sending is not a cancellation.
pub async fn run_and_await_outcome<D>(
    engine: &Engine,
    task: TaskId,
    decisions: &mut D,
    cancel: oneshot::Receiver<()>,
    options: ExecutionOptions,
) -> Result<RunOutcome>
where
    D: DecisionSource + ?Sized,
{
    let mut cancel = Some(cancel);
    let mut round = 0u32;

    loop {
        let planned = engine.begin_run(task)?;
        let wait = options.wait_for(planned);
        let name = engine
            .task(task)
            .map(|t| t.name)
            .unwrap_or_default();

        info!(task, name = %name, planned, round, "task started; waiting for planned duration");

        tokio::select! {
            _ = cancel_requested(&mut cancel) => {
                info!(task, round, "cancelled while waiting for planned duration");
                return Ok(RunOutcome::Cancelled);
            }
            _ = tokio::time::sleep(wait) => {}
        }

        info!(task, name = %name, "time is up; awaiting decision");
        let prompt = TimerExpired {
            task,
            name,
            planned_duration: planned,
            round,
        };

        let decision = tokio::select! {
            _ = cancel_requested(&mut cancel) => {
                info!(task, round, "cancelled while awaiting decision");
                return Ok(RunOutcome::Cancelled);
            }
            decision = decisions.decide(prompt) => decision,
        };

        match decision {
            Ok(Decision::Complete { actual_duration }) => {
                let record = engine.mark_task_completed(task, actual_duration)?;
                return Ok(RunOutcome::Completed(record));
            }
            Ok(Decision::Delay { minutes }) => {
                engine.report_delay(task, minutes)?;
                round += 1;
                debug!(task, minutes, round, "delay applied; starting next round");
            }
            Err(TaskplanError::Cancelled(_)) => {
                info!(task, round, "decision source closed; run abandoned");
                return Ok(RunOutcome::Cancelled);
            }
            Err(e) => return Err(e),
        }
    }
}

/// Resolves only on an explicit cancellation. A dropped sender disables
/// the signal for the rest of the run.
async fn cancel_requested(cancel: &mut Option<oneshot::Receiver<()>>) {
    if let Some(rx) = cancel.as_mut() {
        if rx.await.is_ok() {
            return;
        }
    }
    *cancel = None;
    std::future::pending::<()>().await;
}
