// src/engine/core.rs

//! Synchronous project state.
//!
//! Everything here is deterministic and lock-free so it can be tested
//! without Tokio. [`crate::engine::Engine`] puts it behind a lock.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::dag::{
    CriticalPathAnalyzer, GraphBuilder, Infeasibility, Outcome, TaskGraph, WeightedPath,
};
use crate::errors::{Result, TaskplanError};
use crate::report::{ProductivityReport, ProductivityReporter};
use crate::tracker::{CompletionRecord, ExecutionTracker, TaskState, TrackerCommand, TrackerStep};
use crate::types::{Minutes, Task, TaskDef, TaskId};

/// One project: its tasks, the graph derived from them, execution state
/// and the analysis cached after the last mutation.
#[derive(Debug, Clone)]
pub struct ProjectState {
    name: String,
    tasks: BTreeMap<TaskId, Task>,
    graph: Arc<TaskGraph>,
    tracker: ExecutionTracker,
    critical_path: Outcome<WeightedPath>,
    report: ProductivityReport,
}

impl Default for ProjectState {
    fn default() -> Self {
        Self {
            name: String::new(),
            tasks: BTreeMap::new(),
            graph: Arc::new(TaskGraph::default()),
            tracker: ExecutionTracker::default(),
            critical_path: Outcome::Infeasible(Infeasibility::NoTasks),
            report: ProductivityReport::default(),
        }
    }
}

impl ProjectState {
    /// Build a fresh project from task definitions.
    ///
    /// Fails on negative durations and on dependencies that name unknown
    /// tasks. Cycles are accepted here and surface later as
    /// [`Infeasibility::Cyclic`].
    pub fn define(name: impl Into<String>, defs: BTreeMap<TaskId, TaskDef>) -> Result<Self> {
        let name = name.into();
        let tasks = defs
            .into_iter()
            .map(|(id, def)| Task::from_def(id, def).map(|task| (id, task)))
            .collect::<Result<BTreeMap<_, _>>>()?;

        let graph = Arc::new(GraphBuilder::build(&tasks)?);
        let tracker = ExecutionTracker::new(tasks.keys().copied());
        let critical_path = CriticalPathAnalyzer::longest_path(&graph);
        let report = ProductivityReporter::generate_report(&tasks, tracker.records());

        info!(
            project = %name,
            tasks = tasks.len(),
            edges = graph.edge_count(),
            "project defined"
        );

        Ok(Self {
            name,
            tasks,
            graph,
            tracker,
            critical_path,
            report,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tasks(&self) -> &BTreeMap<TaskId, Task> {
        &self.tasks
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    /// Shared handle to the current graph. Later mutations replace the
    /// graph; they never touch a snapshot already handed out.
    pub fn graph(&self) -> Arc<TaskGraph> {
        Arc::clone(&self.graph)
    }

    pub fn tracker(&self) -> &ExecutionTracker {
        &self.tracker
    }

    pub fn state_of(&self, id: TaskId) -> Option<TaskState> {
        self.tracker.state_of(id)
    }

    /// Critical path as of the last definition or delay.
    pub fn last_critical_path(&self) -> &Outcome<WeightedPath> {
        &self.critical_path
    }

    /// Report as of the last completion.
    pub fn last_report(&self) -> &ProductivityReport {
        &self.report
    }

    /// Recompute the report from current state.
    pub fn productivity_report(&self) -> ProductivityReport {
        ProductivityReporter::generate_report(&self.tasks, self.tracker.records())
    }

    /// Move a task into `Running` and return its current planned duration.
    pub fn begin_run(&mut self, id: TaskId) -> Result<Minutes> {
        let planned = self.planned(id)?;
        self.tracker.start(id)?;
        Ok(planned)
    }

    pub fn mark_completed(&mut self, id: TaskId, actual: Minutes) -> Result<CompletionRecord> {
        let planned = self.planned(id)?;
        let (record, step) = self.tracker.complete(id, actual, planned)?;
        self.apply(step)?;
        Ok(record)
    }

    pub fn report_delay(&mut self, id: TaskId, minutes: Minutes) -> Result<()> {
        self.planned(id)?;
        // Validate against the tracker before touching the task set so a
        // rejected delay leaves everything unchanged.
        let mut tracker = self.tracker.clone();
        let step = tracker.delay(id, minutes)?;
        self.replan(&step)?;
        self.tracker = tracker;
        Ok(())
    }

    fn apply(&mut self, step: TrackerStep) -> Result<()> {
        self.replan(&step)?;
        if step.commands.contains(&TrackerCommand::RefreshReport) {
            self.report = self.productivity_report();
            debug!(
                overall = self.report.overall_productivity,
                "productivity report refreshed"
            );
        }
        Ok(())
    }

    /// Apply `Replan` commands: extend durations on a copy of the task set,
    /// rebuild the graph from it, then swap both in.
    fn replan(&mut self, step: &TrackerStep) -> Result<()> {
        let mut tasks = None;
        for command in &step.commands {
            if let TrackerCommand::Replan { task, minutes } = *command {
                let set = tasks.get_or_insert_with(|| self.tasks.clone());
                set.get_mut(&task)
                    .ok_or(TaskplanError::TaskNotFound(task))?
                    .extend(minutes)?;
            }
        }

        let Some(tasks) = tasks else {
            return Ok(());
        };

        let graph = Arc::new(GraphBuilder::build(&tasks)?);
        let previous = self.critical_path.ready().map(|p| p.total);
        self.critical_path = CriticalPathAnalyzer::longest_path(&graph);
        self.tasks = tasks;
        self.graph = graph;

        info!(
            previous_length = ?previous,
            length = ?self.critical_path.ready().map(|p| p.total),
            path = ?self.critical_path.ready().map(|p| &p.tasks),
            "task graph rebuilt after delay; critical path recomputed"
        );
        Ok(())
    }

    fn planned(&self, id: TaskId) -> Result<Minutes> {
        self.tasks
            .get(&id)
            .map(|t| t.planned_duration)
            .ok_or(TaskplanError::TaskNotFound(id))
    }
}
