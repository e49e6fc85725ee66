#![allow(dead_code)]

use std::collections::BTreeMap;

use taskplan::config::{ConfigSection, ProjectFile, ProjectSection, RawProjectFile, TaskConfig};
use taskplan::engine::Engine;
use taskplan::types::{Minutes, TaskDef, TaskId};

/// Builder for task definition maps, to simplify test setup.
pub struct ProjectBuilder {
    name: String,
    tasks: BTreeMap<TaskId, TaskDef>,
}

impl ProjectBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tasks: BTreeMap::new(),
        }
    }

    pub fn task(mut self, id: TaskId, name: &str, duration: Minutes, after: &[TaskId]) -> Self {
        self.tasks.insert(id, TaskDef::new(name, duration, after));
        self
    }

    pub fn defs(&self) -> BTreeMap<TaskId, TaskDef> {
        self.tasks.clone()
    }

    /// Define the project on a fresh engine.
    pub fn engine(self) -> Engine {
        let engine = Engine::new();
        engine
            .define_project(self.name, self.tasks)
            .expect("Failed to define project from builder");
        engine
    }

    /// Equivalent validated project file.
    pub fn project_file(self, seconds_per_minute: f64) -> ProjectFile {
        let task = self
            .tasks
            .into_iter()
            .map(|(id, def)| {
                (
                    id.to_string(),
                    TaskConfig {
                        name: Some(def.name),
                        duration: def.duration,
                        after: def.dependencies,
                    },
                )
            })
            .collect();

        ProjectFile::try_from(RawProjectFile {
            config: ConfigSection { seconds_per_minute },
            project: ProjectSection { name: self.name },
            task,
        })
        .expect("Failed to build valid project file from builder")
    }
}

/// The four-task diamond used throughout the tests:
///
/// ```text
///        +-> 2 (B, 3) -+
/// 1 (A, 5)              +-> 4 (D, 2)
///        +-> 3 (C, 4) -+
/// ```
pub fn diamond() -> ProjectBuilder {
    ProjectBuilder::new("diamond")
        .task(1, "A", 5.0, &[])
        .task(2, "B", 3.0, &[1])
        .task(3, "C", 4.0, &[1])
        .task(4, "D", 2.0, &[2, 3])
}

/// A -> B -> A.
pub fn two_cycle() -> ProjectBuilder {
    ProjectBuilder::new("cycle")
        .task(1, "A", 1.0, &[2])
        .task(2, "B", 1.0, &[1])
}
