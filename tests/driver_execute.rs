// tests/driver_execute.rs

mod common;
use crate::common::builders::{diamond, two_cycle};
use crate::common::scripted::{NeverDecides, ScriptedDecisions};
use crate::common::{fast_clock, init_tracing, with_timeout};

use std::error::Error;
use std::time::Duration;

use tokio::sync::watch;

use taskplan::dag::Infeasibility;
use taskplan::driver::{describe_infeasibility, execute, execution_targets, spawn_prompter};
use taskplan::engine::{ChannelDecisionSource, Decision, RunOutcome};
use taskplan::tracker::TaskState;

type TestResult = Result<(), Box<dyn Error>>;

fn done(actual_duration: f64) -> Decision {
    Decision::Complete { actual_duration }
}

#[tokio::test]
async fn executes_every_target_in_dependency_order() -> TestResult {
    init_tracing();
    let engine = diamond().engine();
    let targets = execution_targets(&engine).map_err(describe_infeasibility)?;
    assert_eq!(targets, vec![1, 2, 3, 4]);

    let mut decisions = ScriptedDecisions::new([done(5.0), done(3.0), done(4.0), done(2.0)]);
    let prompts = decisions.prompts();
    let (_shutdown_tx, shutdown_rx) = watch::channel(false);

    let outcomes = with_timeout(execute(
        &engine,
        &targets,
        &mut decisions,
        shutdown_rx,
        fast_clock(),
    ))
    .await?;

    let ran: Vec<_> = outcomes.iter().map(|(task, _)| *task).collect();
    assert_eq!(ran, vec![1, 2, 3, 4]);
    assert!(outcomes
        .iter()
        .all(|(_, outcome)| matches!(outcome, RunOutcome::Completed(_))));

    let prompted: Vec<_> = prompts.lock().unwrap().iter().map(|p| p.task).collect();
    assert_eq!(prompted, vec![1, 2, 3, 4]);

    assert!(engine.unfinished().is_empty());
    assert_eq!(execution_targets(&engine), Ok(Vec::new()));
    Ok(())
}

#[tokio::test]
async fn stops_at_the_first_abandoned_run() -> TestResult {
    init_tracing();
    let engine = diamond().engine();
    let targets = vec![1, 2, 3, 4];

    let mut decisions = ScriptedDecisions::new([done(5.0), Decision::Delay { minutes: 1.0 }, done(4.0)]);
    let (_shutdown_tx, shutdown_rx) = watch::channel(false);

    let outcomes = with_timeout(execute(
        &engine,
        &targets,
        &mut decisions,
        shutdown_rx,
        fast_clock(),
    ))
    .await?;

    // Task 2 is delayed then completed; task 3 finds the script empty.
    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[2], (3, RunOutcome::Cancelled));
    assert_eq!(engine.state_of(2), Some(TaskState::Completed));
    assert_eq!(engine.state_of(4), Some(TaskState::Pending));

    // Resuming picks up exactly where the run stopped.
    assert_eq!(execution_targets(&engine), Ok(vec![3, 4]));
    Ok(())
}

#[tokio::test]
async fn shutdown_cancels_the_current_task() -> TestResult {
    init_tracing();
    let engine = diamond().engine();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut never = NeverDecides;

    let run = execute(&engine, &[1, 2], &mut never, shutdown_rx, fast_clock());
    let stopper = async {
        tokio::time::sleep(Duration::from_millis(30)).await;
        let _ = shutdown_tx.send(true);
    };

    let (outcomes, ()) = with_timeout(async { tokio::join!(run, stopper) }).await;

    assert_eq!(outcomes?, vec![(1, RunOutcome::Cancelled)]);
    assert!(engine.completion_record(1).is_none());
    Ok(())
}

#[test]
fn cyclic_project_has_no_execution_targets() {
    let engine = two_cycle().engine();
    let reason = execution_targets(&engine).unwrap_err();

    assert_eq!(reason, Infeasibility::Cyclic { task: 1 });
    assert!(describe_infeasibility(reason).contains("cyclic"));
}

#[test]
fn infeasibility_descriptions_name_the_tasks() {
    assert_eq!(describe_infeasibility(Infeasibility::NoTasks), "no tasks defined");
    assert_eq!(
        describe_infeasibility(Infeasibility::NoPath { from: 4, to: 1 }),
        "no path from task 4 to task 1"
    );
}

#[tokio::test]
async fn unusable_answers_are_asked_again_instead_of_aborting() -> TestResult {
    init_tracing();
    let engine = diamond().engine();
    let (mut source, prompts, answers) = ChannelDecisionSource::channel(4);

    let input: &'static [u8] = b"delay -5\ndone NaN\nmaybe\ndone 4\ndone 3\n";
    let prompter = spawn_prompter(input, prompts, answers);

    let (_shutdown_tx, shutdown_rx) = watch::channel(false);
    let outcomes = with_timeout(execute(
        &engine,
        &[1, 2],
        &mut source,
        shutdown_rx,
        fast_clock(),
    ))
    .await?;

    assert_eq!(outcomes.len(), 2);
    let RunOutcome::Completed(first) = &outcomes[0].1 else {
        panic!("expected task 1 to complete, got {:?}", outcomes[0]);
    };
    assert_eq!(first.task, 1);
    assert_eq!(first.actual_duration, 4.0);

    // The rejected delay never reached the engine.
    assert_eq!(engine.task(1).map(|t| t.planned_duration), Some(5.0));
    assert_eq!(engine.state_of(2), Some(TaskState::Completed));

    drop(source);
    with_timeout(prompter).await?;
    Ok(())
}
