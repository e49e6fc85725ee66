// src/dag/shortest_path.rs

use petgraph::algo::astar;
use petgraph::visit::EdgeRef;
use tracing::debug;

use crate::dag::graph::TaskGraph;
use crate::dag::outcome::{Infeasibility, Outcome, WeightedPath};
use crate::errors::{Result, TaskplanError};
use crate::types::{Minutes, TaskId};

/// Minimum-weight path between two tasks.
///
/// Edge weights are dependent durations and never negative, so Dijkstra is
/// exact; petgraph's `astar` with a zero heuristic is Dijkstra that also
/// hands back the path. Dijkstra does not need acyclicity, so a cycle
/// elsewhere in the project does not block the query.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestPathFinder;

impl ShortestPathFinder {
    pub fn shortest_path(
        graph: &TaskGraph,
        start: TaskId,
        end: TaskId,
    ) -> Result<Outcome<WeightedPath>> {
        for id in [start, end] {
            if !graph.contains(id) {
                return Err(TaskplanError::TaskNotFound(id));
            }
        }

        if start == end {
            return Ok(Outcome::Ready(WeightedPath::single(start)));
        }

        let found = astar(
            graph.inner(),
            start,
            |node| node == end,
            |edge| *edge.weight(),
            |_| 0.0 as Minutes,
        );

        match found {
            Some((total, tasks)) => {
                debug!(from = start, to = end, path = ?tasks, total, "shortest path found");
                Ok(Outcome::Ready(WeightedPath { tasks, total }))
            }
            None => {
                debug!(from = start, to = end, "no path between tasks");
                Ok(Outcome::Infeasible(Infeasibility::NoPath {
                    from: start,
                    to: end,
                }))
            }
        }
    }
}
