// src/tracker/state.rs

//! Task lifecycle states and completion records.

use std::fmt;

use crate::types::{Minutes, TaskId, percentage};

/// Execution state of a single task.
///
/// ```text
/// Pending -> Running -> Completed
///               |  ^
///               v  |
///             Delayed -> Completed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    Running,
    /// Ran past its planned duration; planned duration was extended.
    Delayed,
    Completed,
}

impl TaskState {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskState::Pending => "Pending",
            TaskState::Running => "Running",
            TaskState::Delayed => "Delayed",
            TaskState::Completed => "Completed",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, TaskState::Completed)
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What was recorded when a task finished.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRecord {
    pub task: TaskId,
    pub actual_duration: Minutes,
    pub completed: bool,
    /// `actual / planned * 100` against the planned duration at the time
    /// of completion; 0 when planned was 0.
    pub productivity_ratio: f64,
}

impl CompletionRecord {
    pub fn completed(task: TaskId, actual_duration: Minutes, planned: Minutes) -> Self {
        Self {
            task,
            actual_duration,
            completed: true,
            productivity_ratio: percentage(actual_duration, planned),
        }
    }
}
