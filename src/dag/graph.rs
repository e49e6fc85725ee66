// src/dag/graph.rs

use std::collections::BTreeMap;

use petgraph::Direction;
use petgraph::algo::is_cyclic_directed;
use petgraph::graphmap::DiGraphMap;

use crate::types::{Minutes, TaskId};

/// Per-node annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskNode {
    pub name: String,
    pub duration: Minutes,
}

/// Immutable task dependency graph.
///
/// Edges run dependency -> dependent and carry the *dependent's* planned
/// duration. Instances are only produced by [`crate::dag::GraphBuilder`];
/// a changed duration means a new graph, never an edited one.
#[derive(Debug, Clone, Default)]
pub struct TaskGraph {
    graph: DiGraphMap<TaskId, Minutes>,
    nodes: BTreeMap<TaskId, TaskNode>,
}

impl TaskGraph {
    pub(crate) fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            graph: DiGraphMap::with_capacity(nodes, edges),
            nodes: BTreeMap::new(),
        }
    }

    pub(crate) fn insert_node(&mut self, id: TaskId, node: TaskNode) {
        self.graph.add_node(id);
        self.nodes.insert(id, node);
    }

    pub(crate) fn insert_edge(&mut self, from: TaskId, to: TaskId, weight: Minutes) {
        self.graph.add_edge(from, to, weight);
    }

    /// Underlying petgraph structure, for algorithms.
    pub(crate) fn inner(&self) -> &DiGraphMap<TaskId, Minutes> {
        &self.graph
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// All task ids in ascending order.
    pub fn task_ids(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.nodes.keys().copied()
    }

    pub fn node(&self, id: TaskId) -> Option<&TaskNode> {
        self.nodes.get(&id)
    }

    pub fn duration_of(&self, id: TaskId) -> Option<Minutes> {
        self.nodes.get(&id).map(|n| n.duration)
    }

    pub fn name_of(&self, id: TaskId) -> Option<&str> {
        self.nodes.get(&id).map(|n| n.name.as_str())
    }

    /// Direct dependencies of `id`, ascending.
    pub fn dependencies_of(&self, id: TaskId) -> Vec<TaskId> {
        self.sorted_neighbors(id, Direction::Incoming)
    }

    /// Direct dependents of `id`, ascending.
    pub fn dependents_of(&self, id: TaskId) -> Vec<TaskId> {
        self.sorted_neighbors(id, Direction::Outgoing)
    }

    pub fn edge_weight(&self, from: TaskId, to: TaskId) -> Option<Minutes> {
        self.graph.edge_weight(from, to).copied()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Tasks without dependencies, ascending.
    pub fn roots(&self) -> Vec<TaskId> {
        self.task_ids()
            .filter(|&id| {
                self.graph
                    .neighbors_directed(id, Direction::Incoming)
                    .next()
                    .is_none()
            })
            .collect()
    }

    pub fn has_cycle(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    fn sorted_neighbors(&self, id: TaskId, dir: Direction) -> Vec<TaskId> {
        if !self.graph.contains_node(id) {
            return Vec::new();
        }
        let mut out: Vec<TaskId> = self.graph.neighbors_directed(id, dir).collect();
        out.sort_unstable();
        out
    }
}
