// src/tracker/mod.rs

//! Per-task execution state machine.
//!
//! The tracker only knows about states and completion records. It does not
//! own the task set or the graph; instead every transition returns a
//! [`TrackerStep`] listing what the owner must do next (rebuild the graph,
//! recompute the critical path, refresh the report).

pub mod state;

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::errors::{Result, TaskplanError};
use crate::types::{Minutes, TaskId, check_minutes};

pub use state::{CompletionRecord, TaskState};

/// Follow-up work requested by a tracker transition.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerCommand {
    /// Add `minutes` to the task's planned duration, rebuild the graph and
    /// recompute the critical path.
    Replan { task: TaskId, minutes: Minutes },
    /// Regenerate the productivity report.
    RefreshReport,
}

/// Structured result of a single transition.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerStep {
    pub state: TaskState,
    pub commands: Vec<TrackerCommand>,
}

#[derive(Debug, Clone, Default)]
pub struct ExecutionTracker {
    states: BTreeMap<TaskId, TaskState>,
    records: BTreeMap<TaskId, CompletionRecord>,
}

impl ExecutionTracker {
    /// Fresh tracker with every task `Pending`.
    pub fn new(tasks: impl IntoIterator<Item = TaskId>) -> Self {
        Self {
            states: tasks.into_iter().map(|id| (id, TaskState::Pending)).collect(),
            records: BTreeMap::new(),
        }
    }

    pub fn state_of(&self, task: TaskId) -> Option<TaskState> {
        self.states.get(&task).copied()
    }

    pub fn record(&self, task: TaskId) -> Option<&CompletionRecord> {
        self.records.get(&task)
    }

    pub fn records(&self) -> &BTreeMap<TaskId, CompletionRecord> {
        &self.records
    }

    /// Tasks that are not completed yet, ascending.
    pub fn unfinished(&self) -> Vec<TaskId> {
        self.states
            .iter()
            .filter(|(_, s)| !s.is_terminal())
            .map(|(&id, _)| id)
            .collect()
    }

    /// Begin (or resume after a delay) the timed run of a task.
    pub fn start(&mut self, task: TaskId) -> Result<TrackerStep> {
        let state = self.current(task)?;
        match state {
            TaskState::Pending | TaskState::Delayed | TaskState::Running => {
                self.states.insert(task, TaskState::Running);
                debug!(task, from = %state, "task running");
                Ok(TrackerStep {
                    state: TaskState::Running,
                    commands: Vec::new(),
                })
            }
            TaskState::Completed => Err(illegal(task, state, TaskState::Running)),
        }
    }

    /// Mark a task completed with its actual duration. Allowed from any
    /// state; re-marking overwrites the previous record.
    pub fn complete(
        &mut self,
        task: TaskId,
        actual_duration: Minutes,
        planned: Minutes,
    ) -> Result<(CompletionRecord, TrackerStep)> {
        let state = self.current(task)?;
        check_minutes(task, actual_duration)?;

        let record = CompletionRecord::completed(task, actual_duration, planned);
        self.states.insert(task, TaskState::Completed);
        if self.records.insert(task, record.clone()).is_some() {
            debug!(task, "overwriting previous completion record");
        }

        info!(
            task,
            from = %state,
            actual_duration,
            planned,
            productivity = record.productivity_ratio,
            "task completed"
        );

        let step = TrackerStep {
            state: TaskState::Completed,
            commands: vec![TrackerCommand::RefreshReport],
        };
        Ok((record, step))
    }

    /// The task overran; extend it by `minutes`.
    pub fn delay(&mut self, task: TaskId, minutes: Minutes) -> Result<TrackerStep> {
        let state = self.current(task)?;
        check_minutes(task, minutes)?;

        if state == TaskState::Completed {
            return Err(illegal(task, state, TaskState::Delayed));
        }

        self.states.insert(task, TaskState::Delayed);
        info!(task, from = %state, minutes, "task delayed");

        Ok(TrackerStep {
            state: TaskState::Delayed,
            commands: vec![TrackerCommand::Replan { task, minutes }],
        })
    }

    fn current(&self, task: TaskId) -> Result<TaskState> {
        self.state_of(task)
            .ok_or(TaskplanError::TaskNotFound(task))
    }
}

fn illegal(task: TaskId, from: TaskState, to: TaskState) -> TaskplanError {
    TaskplanError::InvalidTransition {
        task,
        from: from.as_str(),
        to: to.as_str(),
    }
}
