// src/errors.rs

//! Crate-wide error type and result alias.
//!
//! Graph-shape problems (cycles, unreachable pairs, empty projects) are not
//! errors; they are reported through [`crate::dag::Outcome`]. Everything in
//! here is a structural input problem or an I/O failure.

use thiserror::Error;

use crate::types::{Minutes, TaskId};

#[derive(Error, Debug)]
pub enum TaskplanError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    #[error("task {task} depends on unknown task {dependency}")]
    InvalidReference { task: TaskId, dependency: TaskId },

    #[error("invalid duration for task {task}: {minutes} (must be a finite number >= 0)")]
    InvalidDuration { task: TaskId, minutes: Minutes },

    #[error("task {task} cannot go from {from} to {to}")]
    InvalidTransition {
        task: TaskId,
        from: &'static str,
        to: &'static str,
    },

    #[error("execution of task {0} was cancelled")]
    Cancelled(TaskId),
}

pub type Result<T> = std::result::Result<T, TaskplanError>;
