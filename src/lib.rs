// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod driver;
pub mod engine;
pub mod errors;
pub mod logging;
pub mod report;
pub mod tracker;
pub mod types;

use std::path::PathBuf;

use anyhow::Result;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::cli::CliArgs;
use crate::config::load_and_validate;
use crate::engine::{ChannelDecisionSource, Engine};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - project file loading
/// - the engine and its initial analysis
/// - the terminal prompter feeding completion decisions
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let project_path = PathBuf::from(&args.project);
    let project = load_and_validate(&project_path)?;

    let engine = Engine::new();
    engine.define_project(project.project.name.clone(), project.tasks.clone())?;

    driver::print_analysis(&engine, args.from.zip(args.to))?;

    if args.dry_run {
        return Ok(());
    }

    let targets = match args.task {
        Some(task) => vec![task],
        None => match driver::execution_targets(&engine) {
            Ok(targets) => targets,
            Err(reason) => {
                warn!(reason = %driver::describe_infeasibility(reason), "nothing to execute");
                return Ok(());
            }
        },
    };

    let (mut source, prompts, decisions) = ChannelDecisionSource::channel(8);
    let _prompter = driver::spawn_terminal_prompter(prompts, decisions);

    // Ctrl-C → cancel the running task.
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("failed to listen for Ctrl+C: {e}");
            return;
        }
        let _ = shutdown_tx.send(true);
    });

    info!(?targets, "executing tasks");
    let options = project.config.execution_options();
    let outcomes = driver::execute(&engine, &targets, &mut source, shutdown_rx, options).await?;
    info!(runs = outcomes.len(), "execution finished");

    println!();
    driver::print_report(&engine.productivity_report());
    Ok(())
}
