use std::collections::BTreeSet;

use crate::errors::{Result, TaskplanError};

/// Task identifier.
pub type TaskId = u32;

/// Durations are measured in minutes.
pub type Minutes = f64;

/// Task definition as handed to [`crate::engine::Engine::define_project`].
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDef {
    pub name: String,
    pub duration: Minutes,
    pub dependencies: Vec<TaskId>,
}

impl TaskDef {
    pub fn new(name: impl Into<String>, duration: Minutes, dependencies: &[TaskId]) -> Self {
        Self {
            name: name.into(),
            duration,
            dependencies: dependencies.to_vec(),
        }
    }
}

/// A task in the current project.
///
/// `planned_duration` only ever grows after the project is defined
/// (see [`Task::extend`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub planned_duration: Minutes,
    pub dependencies: BTreeSet<TaskId>,
}

impl Task {
    pub fn from_def(id: TaskId, def: TaskDef) -> Result<Self> {
        check_minutes(id, def.duration)?;
        Ok(Self {
            id,
            name: def.name,
            planned_duration: def.duration,
            dependencies: def.dependencies.into_iter().collect(),
        })
    }

    /// Add `minutes` to the planned duration.
    pub fn extend(&mut self, minutes: Minutes) -> Result<()> {
        check_minutes(self.id, minutes)?;
        self.planned_duration += minutes;
        Ok(())
    }
}

/// Finite and not negative.
pub fn is_valid_minutes(minutes: Minutes) -> bool {
    minutes.is_finite() && minutes >= 0.0
}

/// Reject negative and non-finite minute values.
pub fn check_minutes(task: TaskId, minutes: Minutes) -> Result<()> {
    if is_valid_minutes(minutes) {
        Ok(())
    } else {
        Err(TaskplanError::InvalidDuration { task, minutes })
    }
}

/// `part / whole * 100`, or 0 when `whole` is zero.
pub fn percentage(part: Minutes, whole: Minutes) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}
