// src/dag/critical_path.rs

//! Longest (maximum total duration) path through the task graph.
//!
//! Nodes carry the cost: the length of a path is the sum of the planned
//! durations of the tasks on it. Computed as a DP over the topological
//! order:
//!
//! ```text
//! best[v] = duration[v] + max(best[u] for u in deps(v), default 0)
//! ```

use std::collections::BTreeMap;

use tracing::debug;

use crate::dag::graph::TaskGraph;
use crate::dag::outcome::{Outcome, WeightedPath};
use crate::dag::topo::TopologicalSorter;
use crate::types::{Minutes, TaskId};

#[derive(Debug, Clone, Copy)]
struct Best {
    length: Minutes,
    via: Option<TaskId>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CriticalPathAnalyzer;

impl CriticalPathAnalyzer {
    /// Compute the critical path. Ties are broken towards smaller ids,
    /// both when choosing a predecessor and when choosing the final task.
    pub fn longest_path(graph: &TaskGraph) -> Outcome<WeightedPath> {
        let order = match TopologicalSorter::sort(graph) {
            Outcome::Ready(order) => order,
            Outcome::Infeasible(reason) => return Outcome::Infeasible(reason),
        };

        let mut best: BTreeMap<TaskId, Best> = BTreeMap::new();

        for &id in &order {
            let mut via: Option<(TaskId, Minutes)> = None;
            for dep in graph.dependencies_of(id) {
                let Some(candidate) = best.get(&dep) else {
                    continue;
                };
                match via {
                    Some((_, len)) if candidate.length <= len => {}
                    _ => via = Some((dep, candidate.length)),
                }
            }

            let own = graph.duration_of(id).unwrap_or_default();
            best.insert(
                id,
                Best {
                    length: own + via.map(|(_, len)| len).unwrap_or(0.0),
                    via: via.map(|(dep, _)| dep),
                },
            );
        }

        let mut end: Option<(TaskId, Minutes)> = None;
        for (&id, b) in &best {
            match end {
                Some((_, len)) if b.length <= len => {}
                _ => end = Some((id, b.length)),
            }
        }

        let Some((end, _)) = end else {
            return Outcome::Ready(WeightedPath {
                tasks: Vec::new(),
                total: 0.0,
            });
        };

        let mut tasks = vec![end];
        let mut cursor = best.get(&end).and_then(|b| b.via);
        while let Some(id) = cursor {
            tasks.push(id);
            cursor = best.get(&id).and_then(|b| b.via);
        }
        tasks.reverse();

        let total = tasks
            .iter()
            .filter_map(|&id| graph.duration_of(id))
            .sum::<Minutes>();

        debug!(path = ?tasks, total, "critical path computed");
        Outcome::Ready(WeightedPath { tasks, total })
    }
}
