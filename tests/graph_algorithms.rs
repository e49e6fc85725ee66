// tests/graph_algorithms.rs

mod common;
use crate::common::builders::{ProjectBuilder, diamond, two_cycle};
use crate::common::{approx, init_tracing};

use std::collections::BTreeMap;
use std::error::Error;

use taskplan::dag::{
    CriticalPathAnalyzer, GraphBuilder, Infeasibility, LegacyView, Outcome, ShortestPathFinder,
    TopologicalSorter,
};
use taskplan::engine::Engine;
use taskplan::errors::TaskplanError;
use taskplan::types::{Task, TaskDef, TaskId};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn diamond_order_starts_with_root_and_ends_with_sink() -> TestResult {
    init_tracing();
    let engine = diamond().engine();

    let order = match engine.topological_order() {
        Outcome::Ready(order) => order,
        other => panic!("expected an order, got {other:?}"),
    };

    assert_eq!(order, vec![1, 2, 3, 4]);
    Ok(())
}

#[test]
fn diamond_critical_path_takes_the_longer_branch() -> TestResult {
    init_tracing();
    let engine = diamond().engine();

    let (path, length) = engine.critical_path().into_legacy();
    assert_eq!(path, vec![1, 3, 4]);
    assert!(approx(length, 11.0));
    Ok(())
}

#[test]
fn diamond_shortest_path_uses_dependent_durations() -> TestResult {
    init_tracing();
    let engine = diamond().engine();

    let (path, weight) = engine.shortest_path(1, 4)?.into_legacy();
    assert_eq!(path, vec![1, 2, 4]);
    assert!(approx(weight, 5.0));

    let graph = engine.graph_snapshot();
    assert_eq!(graph.edge_weight(1, 3), Some(4.0));
    assert_eq!(graph.edge_weight(3, 4), Some(2.0));
    assert_eq!(graph.edge_weight(4, 3), None);
    Ok(())
}

#[test]
fn shortest_path_to_self_is_trivial() -> TestResult {
    let engine = diamond().engine();

    for id in 1..=4 {
        let (path, weight) = engine.shortest_path(id, id)?.into_legacy();
        assert_eq!(path, vec![id]);
        assert!(approx(weight, 0.0));
    }
    Ok(())
}

#[test]
fn shortest_path_against_edge_direction_reports_no_path() -> TestResult {
    let engine = diamond().engine();

    let outcome = engine.shortest_path(4, 1)?;
    assert_eq!(
        outcome.infeasibility(),
        Some(Infeasibility::NoPath { from: 4, to: 1 })
    );
    assert_eq!(outcome.into_legacy(), (Vec::new(), 0.0));

    // Siblings are not connected either.
    let outcome = engine.shortest_path(2, 3)?;
    assert!(!outcome.is_ready());
    Ok(())
}

#[test]
fn shortest_path_with_unknown_task_is_an_error() {
    let engine = diamond().engine();

    match engine.shortest_path(1, 99) {
        Err(TaskplanError::TaskNotFound(99)) => {}
        other => panic!("expected TaskNotFound(99), got {other:?}"),
    }
}

#[test]
fn cycle_is_reported_as_infeasible_not_as_error() -> TestResult {
    init_tracing();
    let engine = two_cycle().engine();

    assert_eq!(
        engine.topological_order(),
        Outcome::Infeasible(Infeasibility::Cyclic { task: 1 })
    );
    assert!(engine.topological_order().into_legacy().is_empty());

    let (path, length) = engine.critical_path().into_legacy();
    assert!(path.is_empty());
    assert!(approx(length, 0.0));

    // Shortest paths do not need an order and still answer.
    assert_eq!(engine.shortest_path(1, 1)?.into_legacy(), (vec![1], 0.0));
    assert_eq!(engine.shortest_path(1, 2)?.into_legacy(), (vec![1, 2], 1.0));
    Ok(())
}

#[test]
fn unrelated_cycle_does_not_block_shortest_paths() -> TestResult {
    let engine = ProjectBuilder::new("island")
        .task(1, "A", 1.0, &[])
        .task(2, "B", 2.0, &[1])
        .task(3, "C", 1.0, &[4])
        .task(4, "D", 1.0, &[3])
        .engine();

    assert_eq!(
        engine.topological_order().infeasibility(),
        Some(Infeasibility::Cyclic { task: 3 })
    );

    let (path, weight) = engine.shortest_path(1, 2)?.into_legacy();
    assert_eq!(path, vec![1, 2]);
    assert!(approx(weight, 2.0));

    for id in 1..=4 {
        assert_eq!(engine.shortest_path(id, id)?.into_legacy(), (vec![id], 0.0));
    }

    // Walking around the cycle is still a valid path.
    let (path, weight) = engine.shortest_path(3, 4)?.into_legacy();
    assert_eq!(path, vec![3, 4]);
    assert!(approx(weight, 1.0));

    assert_eq!(
        engine.shortest_path(1, 3)?.infeasibility(),
        Some(Infeasibility::NoPath { from: 1, to: 3 })
    );
    Ok(())
}

#[test]
fn self_dependency_is_a_cycle() {
    let engine = ProjectBuilder::new("self")
        .task(1, "A", 1.0, &[])
        .task(2, "B", 1.0, &[1, 2])
        .engine();

    assert_eq!(
        engine.topological_order(),
        Outcome::Infeasible(Infeasibility::Cyclic { task: 2 })
    );
    assert!(engine.graph_snapshot().has_cycle());
}

#[test]
fn downstream_of_a_cycle_is_also_unordered() {
    let engine = ProjectBuilder::new("tail")
        .task(1, "A", 1.0, &[])
        .task(2, "B", 1.0, &[1, 3])
        .task(3, "C", 1.0, &[2])
        .task(4, "D", 1.0, &[3])
        .engine();

    assert_eq!(
        engine.topological_order().infeasibility(),
        Some(Infeasibility::Cyclic { task: 2 })
    );
}

#[test]
fn empty_project_is_distinguished_from_a_cycle() {
    let engine = Engine::new();

    assert_eq!(
        engine.topological_order(),
        Outcome::Infeasible(Infeasibility::NoTasks)
    );
    assert_eq!(
        engine.critical_path(),
        Outcome::Infeasible(Infeasibility::NoTasks)
    );
}

#[test]
fn ties_are_broken_by_ascending_id() {
    let engine = ProjectBuilder::new("ties")
        .task(5, "E", 1.0, &[])
        .task(3, "C", 1.0, &[])
        .task(9, "I", 1.0, &[3])
        .task(1, "A", 1.0, &[])
        .task(4, "D", 1.0, &[5])
        .engine();

    assert_eq!(engine.topological_order().into_legacy(), vec![1, 3, 5, 4, 9]);

    // Both chains are 2 minutes long and the single nodes 1 minute; the
    // chain ending in the smallest id wins.
    let (path, length) = engine.critical_path().into_legacy();
    assert_eq!(path, vec![5, 4]);
    assert!(approx(length, 2.0));
}

#[test]
fn independent_tasks_critical_path_is_the_longest_single_task() {
    let engine = ProjectBuilder::new("flat")
        .task(1, "A", 2.0, &[])
        .task(2, "B", 7.5, &[])
        .task(3, "C", 7.0, &[])
        .engine();

    let (path, length) = engine.critical_path().into_legacy();
    assert_eq!(path, vec![2]);
    assert!(approx(length, 7.5));
}

#[test]
fn zero_duration_tasks_are_allowed() {
    let engine = ProjectBuilder::new("milestones")
        .task(1, "Kickoff", 0.0, &[])
        .task(2, "Work", 10.0, &[1])
        .task(3, "Sign-off", 0.0, &[2])
        .engine();

    let (path, length) = engine.critical_path().into_legacy();
    assert_eq!(path, vec![1, 2, 3]);
    assert!(approx(length, 10.0));
}

#[test]
fn unknown_dependency_is_rejected_at_definition() {
    let engine = Engine::new();
    let defs = ProjectBuilder::new("broken")
        .task(1, "A", 1.0, &[])
        .task(2, "B", 1.0, &[7])
        .defs();

    match engine.define_project("broken", defs) {
        Err(TaskplanError::InvalidReference {
            task: 2,
            dependency: 7,
        }) => {}
        other => panic!("expected InvalidReference, got {other:?}"),
    }

    // A failed definition leaves the previous (empty) project in place.
    assert!(engine.graph_snapshot().is_empty());
}

#[test]
fn negative_duration_is_rejected_at_definition() {
    let engine = diamond().engine();
    let mut defs = diamond().defs();
    defs.insert(5, TaskDef::new("E", -1.0, &[4]));

    match engine.define_project("bad", defs) {
        Err(TaskplanError::InvalidDuration { task: 5, .. }) => {}
        other => panic!("expected InvalidDuration, got {other:?}"),
    }

    assert_eq!(engine.graph_snapshot().len(), 4);
    assert_eq!(engine.project_name(), "diamond");
}

#[test]
fn builder_output_matches_task_definitions() -> TestResult {
    let engine = diamond().engine();
    let tasks: BTreeMap<TaskId, Task> = engine
        .tasks()
        .into_iter()
        .map(|t| (t.id, t))
        .collect();

    let graph = GraphBuilder::build(&tasks)?;
    assert_eq!(graph.len(), 4);
    assert_eq!(graph.edge_count(), 4);
    assert_eq!(graph.roots(), vec![1]);
    assert_eq!(graph.dependencies_of(4), vec![2, 3]);
    assert_eq!(graph.dependents_of(1), vec![2, 3]);
    assert_eq!(graph.name_of(3), Some("C"));
    assert_eq!(graph.duration_of(3), Some(4.0));

    assert_eq!(TopologicalSorter::sort(&graph), engine.topological_order());
    assert_eq!(CriticalPathAnalyzer::longest_path(&graph), engine.critical_path());
    assert_eq!(
        ShortestPathFinder::shortest_path(&graph, 1, 4)?,
        engine.shortest_path(1, 4)?
    );
    Ok(())
}

#[test]
fn names_along_resolves_display_names() {
    let engine = diamond().engine();
    assert_eq!(engine.names_along(&[1, 3, 4]), vec!["A", "C", "D"]);
    assert_eq!(engine.names_along(&[42]), vec!["#42"]);
}
