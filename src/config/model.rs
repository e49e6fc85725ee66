// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::engine::ExecutionOptions;
use crate::types::{Minutes, TaskDef, TaskId};

/// Project file as read from TOML, before validation.
///
/// ```toml
/// [config]
/// seconds_per_minute = 60.0
///
/// [project]
/// name = "Website relaunch"
///
/// [task.1]
/// name = "Design"
/// duration = 5
///
/// [task.2]
/// name = "Build"
/// duration = 3
/// after = [1]
/// ```
///
/// All sections are optional apart from at least one task.
#[derive(Debug, Clone, Deserialize)]
pub struct RawProjectFile {
    #[serde(default)]
    pub config: ConfigSection,

    #[serde(default)]
    pub project: ProjectSection,

    /// Tasks from `[task.<id>]`. Keys are strings in TOML and are parsed
    /// into [`TaskId`]s during validation.
    #[serde(default)]
    pub task: BTreeMap<String, TaskConfig>,
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigSection {
    /// Wall-clock seconds per planned minute during timed execution.
    /// Lower it to rehearse a schedule quickly.
    #[serde(default = "default_seconds_per_minute")]
    pub seconds_per_minute: f64,
}

fn default_seconds_per_minute() -> f64 {
    60.0
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            seconds_per_minute: default_seconds_per_minute(),
        }
    }
}

impl ConfigSection {
    pub fn execution_options(&self) -> ExecutionOptions {
        ExecutionOptions {
            seconds_per_minute: self.seconds_per_minute,
        }
    }
}

/// `[project]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectSection {
    #[serde(default = "default_project_name")]
    pub name: String,
}

fn default_project_name() -> String {
    "project".to_string()
}

impl Default for ProjectSection {
    fn default() -> Self {
        Self {
            name: default_project_name(),
        }
    }
}

/// `[task.<id>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskConfig {
    /// Display name; defaults to `Task <id>`.
    #[serde(default)]
    pub name: Option<String>,

    /// Planned duration in minutes.
    pub duration: Minutes,

    /// Ids of tasks that must finish first.
    #[serde(default)]
    pub after: Vec<TaskId>,
}

/// Validated project file.
///
/// Only constructed through `TryFrom<RawProjectFile>` (see
/// [`crate::config::validate`]).
#[derive(Debug, Clone)]
pub struct ProjectFile {
    pub config: ConfigSection,
    pub project: ProjectSection,
    pub tasks: BTreeMap<TaskId, TaskDef>,
}

impl ProjectFile {
    pub(crate) fn new_unchecked(
        config: ConfigSection,
        project: ProjectSection,
        tasks: BTreeMap<TaskId, TaskDef>,
    ) -> Self {
        Self {
            config,
            project,
            tasks,
        }
    }
}
