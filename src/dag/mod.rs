// src/dag/mod.rs

//! Task graph and the read-only algorithms over it.
//!
//! - [`graph`] holds the immutable dependency graph.
//! - [`builder`] derives a graph from the task set (always from scratch).
//! - [`topo`] computes a deterministic execution order.
//! - [`critical_path`] finds the schedule-determining path.
//! - [`shortest_path`] finds the cheapest path between two tasks.
//! - [`outcome`] carries "infeasible" signals without raising errors.

pub mod builder;
pub mod critical_path;
pub mod graph;
pub mod outcome;
pub mod shortest_path;
pub mod topo;

pub use builder::GraphBuilder;
pub use critical_path::CriticalPathAnalyzer;
pub use graph::{TaskGraph, TaskNode};
pub use outcome::{Infeasibility, LegacyView, Outcome, WeightedPath};
pub use shortest_path::ShortestPathFinder;
pub use topo::TopologicalSorter;
