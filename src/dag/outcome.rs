// src/dag/outcome.rs

//! Tagged results for graph queries.
//!
//! An infeasible schedule is an expected state, not a fault: the caller gets
//! [`Outcome::Infeasible`] with the reason, and can still ask for the plain
//! "empty sequence, zero weight" view with [`Outcome::into_legacy`].

use crate::types::{Minutes, TaskId};

/// Why a graph query produced no result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Infeasibility {
    /// The project has no tasks.
    NoTasks,
    /// The dependency graph contains a cycle. `task` is the smallest id
    /// that could not be ordered.
    Cyclic { task: TaskId },
    /// `to` is not reachable from `from`.
    NoPath { from: TaskId, to: TaskId },
}

/// Result of a graph query.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Ready(T),
    Infeasible(Infeasibility),
}

impl<T> Outcome<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Outcome::Ready(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Outcome::Ready(value) => Some(value),
            Outcome::Infeasible(_) => None,
        }
    }

    pub fn infeasibility(&self) -> Option<Infeasibility> {
        match self {
            Outcome::Ready(_) => None,
            Outcome::Infeasible(reason) => Some(*reason),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Ready(value) => Outcome::Ready(f(value)),
            Outcome::Infeasible(reason) => Outcome::Infeasible(reason),
        }
    }
}

/// A path through the task graph together with its total weight.
///
/// For the critical path the weight is the sum of node durations; for the
/// shortest path it is the sum of edge weights.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedPath {
    pub tasks: Vec<TaskId>,
    pub total: Minutes,
}

impl WeightedPath {
    pub fn single(task: TaskId) -> Self {
        Self {
            tasks: vec![task],
            total: 0.0,
        }
    }
}

pub trait LegacyView {
    type View;

    /// Collapse an [`Outcome`] into the untagged shape where "empty" means
    /// "infeasible".
    fn into_legacy(self) -> Self::View;
}

impl LegacyView for Outcome<Vec<TaskId>> {
    type View = Vec<TaskId>;

    fn into_legacy(self) -> Vec<TaskId> {
        match self {
            Outcome::Ready(order) => order,
            Outcome::Infeasible(_) => Vec::new(),
        }
    }
}

impl LegacyView for Outcome<WeightedPath> {
    type View = (Vec<TaskId>, Minutes);

    fn into_legacy(self) -> (Vec<TaskId>, Minutes) {
        match self {
            Outcome::Ready(path) => (path.tasks, path.total),
            Outcome::Infeasible(_) => (Vec::new(), 0.0),
        }
    }
}
