// src/dag/topo.rs

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use petgraph::Direction;
use tracing::{debug, warn};

use crate::dag::graph::TaskGraph;
use crate::dag::outcome::{Infeasibility, Outcome};
use crate::types::TaskId;

/// Kahn's algorithm with a min-heap of ready tasks, so that whenever
/// several tasks are eligible the smallest id goes first.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopologicalSorter;

impl TopologicalSorter {
    pub fn sort(graph: &TaskGraph) -> Outcome<Vec<TaskId>> {
        if graph.is_empty() {
            return Outcome::Infeasible(Infeasibility::NoTasks);
        }

        let inner = graph.inner();
        let mut in_degree: BTreeMap<TaskId, usize> = graph
            .task_ids()
            .map(|id| (id, inner.neighbors_directed(id, Direction::Incoming).count()))
            .collect();

        let mut ready: BinaryHeap<Reverse<TaskId>> = in_degree
            .iter()
            .filter(|&(_, &deg)| deg == 0)
            .map(|(&id, _)| Reverse(id))
            .collect();

        let mut order = Vec::with_capacity(graph.len());

        while let Some(Reverse(id)) = ready.pop() {
            order.push(id);
            for dependent in inner.neighbors_directed(id, Direction::Outgoing) {
                if let Some(deg) = in_degree.get_mut(&dependent) {
                    *deg -= 1;
                    if *deg == 0 {
                        ready.push(Reverse(dependent));
                    }
                }
            }
        }

        if order.len() < graph.len() {
            let stuck = in_degree
                .iter()
                .find(|&(_, &deg)| deg > 0)
                .map(|(&id, _)| id)
                .unwrap_or_default();
            warn!(
                task = stuck,
                ordered = order.len(),
                total = graph.len(),
                "task graph contains a cycle; no topological order"
            );
            return Outcome::Infeasible(Infeasibility::Cyclic { task: stuck });
        }

        debug!(?order, "topological order computed");
        Outcome::Ready(order)
    }
}
