// src/config/validate.rs

use std::collections::BTreeMap;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use tracing::warn;

use crate::config::model::{ConfigSection, ProjectFile, RawProjectFile};
use crate::errors::{Result, TaskplanError};
use crate::types::{TaskDef, TaskId, check_minutes};

impl TryFrom<RawProjectFile> for ProjectFile {
    type Error = TaskplanError;

    fn try_from(raw: RawProjectFile) -> std::result::Result<Self, Self::Error> {
        ensure_has_tasks(&raw)?;
        validate_global_config(&raw.config)?;
        let tasks = parse_tasks(&raw)?;
        validate_task_dependencies(&tasks)?;
        warn_on_cycle(&tasks);
        Ok(ProjectFile::new_unchecked(raw.config, raw.project, tasks))
    }
}

fn ensure_has_tasks(cfg: &RawProjectFile) -> Result<()> {
    if cfg.task.is_empty() {
        return Err(TaskplanError::ConfigError(
            "project must contain at least one [task.<id>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_global_config(cfg: &ConfigSection) -> Result<()> {
    let spm = cfg.seconds_per_minute;
    if !spm.is_finite() || spm <= 0.0 {
        return Err(TaskplanError::ConfigError(format!(
            "[config].seconds_per_minute must be a positive number (got {spm})"
        )));
    }
    Ok(())
}

fn parse_tasks(cfg: &RawProjectFile) -> Result<BTreeMap<TaskId, TaskDef>> {
    let mut tasks = BTreeMap::new();

    for (key, task) in cfg.task.iter() {
        let id: TaskId = key.trim().parse().map_err(|_| {
            TaskplanError::ConfigError(format!(
                "task key '{key}' is not a valid task id (expected a non-negative integer)"
            ))
        })?;

        check_minutes(id, task.duration)?;

        let def = TaskDef {
            name: task.name.clone().unwrap_or_else(|| format!("Task {id}")),
            duration: task.duration,
            dependencies: task.after.clone(),
        };

        if tasks.insert(id, def).is_some() {
            return Err(TaskplanError::ConfigError(format!(
                "task id {id} is defined more than once"
            )));
        }
    }

    Ok(tasks)
}

fn validate_task_dependencies(tasks: &BTreeMap<TaskId, TaskDef>) -> Result<()> {
    for (&id, task) in tasks.iter() {
        for &dep in task.dependencies.iter() {
            if !tasks.contains_key(&dep) {
                return Err(TaskplanError::InvalidReference {
                    task: id,
                    dependency: dep,
                });
            }
        }
    }
    Ok(())
}

/// Cycles are loadable (queries report them as infeasible), but worth a
/// warning at load time.
fn warn_on_cycle(tasks: &BTreeMap<TaskId, TaskDef>) {
    let mut graph: DiGraphMap<TaskId, ()> = DiGraphMap::new();

    for &id in tasks.keys() {
        graph.add_node(id);
    }

    for (&id, task) in tasks.iter() {
        for &dep in task.dependencies.iter() {
            graph.add_edge(dep, id, ());
        }
    }

    if let Err(cycle) = toposort(&graph, None) {
        warn!(
            task = cycle.node_id(),
            "project dependencies contain a cycle; scheduling queries will report it as infeasible"
        );
    }
}
