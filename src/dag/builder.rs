// src/dag/builder.rs

use std::collections::BTreeMap;

use tracing::debug;

use crate::dag::graph::{TaskGraph, TaskNode};
use crate::errors::{Result, TaskplanError};
use crate::types::{Task, TaskId, check_minutes};

/// Builds a fresh [`TaskGraph`] from the current task set.
///
/// Every call starts from nothing. Validation runs before any node is
/// created, so a failed build never yields a half-derived graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphBuilder;

impl GraphBuilder {
    pub fn build(tasks: &BTreeMap<TaskId, Task>) -> Result<TaskGraph> {
        validate(tasks)?;

        let edge_count = tasks.values().map(|t| t.dependencies.len()).sum();
        let mut graph = TaskGraph::with_capacity(tasks.len(), edge_count);

        for (&id, task) in tasks {
            graph.insert_node(
                id,
                TaskNode {
                    name: task.name.clone(),
                    duration: task.planned_duration,
                },
            );
        }

        // Edge direction: dependency -> dependent, weighted by the
        // dependent's planned duration.
        for (&id, task) in tasks {
            for &dep in &task.dependencies {
                graph.insert_edge(dep, id, task.planned_duration);
            }
        }

        debug!(
            nodes = graph.len(),
            edges = graph.edge_count(),
            "task graph rebuilt"
        );

        Ok(graph)
    }
}

fn validate(tasks: &BTreeMap<TaskId, Task>) -> Result<()> {
    for (&id, task) in tasks {
        check_minutes(id, task.planned_duration)?;
        for &dep in &task.dependencies {
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
