// src/engine/handle.rs

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::dag::{
    CriticalPathAnalyzer, Outcome, ShortestPathFinder, TaskGraph, TopologicalSorter, WeightedPath,
};
use crate::engine::core::ProjectState;
use crate::errors::Result;
use crate::report::ProductivityReport;
use crate::tracker::{CompletionRecord, TaskState};
use crate::types::{Minutes, Task, TaskDef, TaskId};

/// The scheduling engine a driver talks to.
///
/// Construct one per project and share it (`Arc<Engine>`) with whatever
/// needs it. All methods are synchronous and hold the internal lock only
/// for as long as it takes to copy a snapshot or swap in new state; graph
/// algorithms run on a snapshot outside the lock.
#[derive(Debug, Default)]
pub struct Engine {
    state: RwLock<ProjectState>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already built project.
    pub fn from_state(state: ProjectState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    /// Replace the whole project. The new state is built before the lock
    /// is taken; on error the current project is left untouched.
    pub fn define_project(
        &self,
        name: impl Into<String>,
        defs: BTreeMap<TaskId, TaskDef>,
    ) -> Result<()> {
        let next = ProjectState::define(name, defs)?;
        *self.write() = next;
        Ok(())
    }

    pub fn project_name(&self) -> String {
        self.read().name().to_string()
    }

    /// Current graph snapshot.
    pub fn graph_snapshot(&self) -> Arc<TaskGraph> {
        self.read().graph()
    }

    pub fn topological_order(&self) -> Outcome<Vec<TaskId>> {
        TopologicalSorter::sort(&self.graph_snapshot())
    }

    pub fn critical_path(&self) -> Outcome<WeightedPath> {
        CriticalPathAnalyzer::longest_path(&self.graph_snapshot())
    }

    pub fn shortest_path(&self, start: TaskId, end: TaskId) -> Result<Outcome<WeightedPath>> {
        ShortestPathFinder::shortest_path(&self.graph_snapshot(), start, end)
    }

    pub fn mark_task_completed(&self, task: TaskId, actual: Minutes) -> Result<CompletionRecord> {
        self.write().mark_completed(task, actual)
    }

    /// Extend `task` by `minutes`, rebuild the graph and recompute the
    /// critical path.
    pub fn report_delay(&self, task: TaskId, minutes: Minutes) -> Result<()> {
        self.write().report_delay(task, minutes)
    }

    pub fn productivity_report(&self) -> ProductivityReport {
        self.read().productivity_report()
    }

    pub fn last_report(&self) -> ProductivityReport {
        self.read().last_report().clone()
    }

    pub fn last_critical_path(&self) -> Outcome<WeightedPath> {
        self.read().last_critical_path().clone()
    }

    pub fn task(&self, id: TaskId) -> Option<Task> {
        self.read().task(id).cloned()
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.read().tasks().values().cloned().collect()
    }

    pub fn state_of(&self, id: TaskId) -> Option<TaskState> {
        self.read().state_of(id)
    }

    pub fn completion_record(&self, id: TaskId) -> Option<CompletionRecord> {
        self.read().tracker().record(id).cloned()
    }

    /// Tasks not yet completed, ascending.
    pub fn unfinished(&self) -> Vec<TaskId> {
        self.read().tracker().unfinished()
    }

    /// Display names for a sequence of ids; unknown ids render as `#<id>`.
    pub fn names_along(&self, path: &[TaskId]) -> Vec<String> {
        let state = self.read();
        path.iter()
            .map(|id| {
                state
                    .task(*id)
                    .map(|t| t.name.clone())
                    .unwrap_or_else(|| format!("#{id}"))
            })
            .collect()
    }

    /// Enter `Running` for a timed run; returns the planned duration.
    pub(crate) fn begin_run(&self, task: TaskId) -> Result<Minutes> {
        let planned = self.write().begin_run(task)?;
        debug!(task, planned, "timed run started");
        Ok(planned)
    }

    fn read(&self) -> RwLockReadGuard<'_, ProjectState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ProjectState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
