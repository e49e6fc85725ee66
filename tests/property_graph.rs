use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;
use taskplan::dag::{LegacyView, Outcome};
use taskplan::engine::Engine;
use taskplan::types::{TaskDef, TaskId};

// Strategy to generate an acyclic project.
// Acyclicity is guaranteed by only letting task N depend on tasks 0..N-1.
// Durations are whole minutes so sums compare exactly.
fn dag_strategy(max_tasks: usize) -> impl Strategy<Value = BTreeMap<TaskId, TaskDef>> {
    (1..=max_tasks).prop_flat_map(|num_tasks| {
        let deps_strat = proptest::collection::vec(
            proptest::collection::vec(any::<usize>(), 0..num_tasks),
            num_tasks,
        );
        let durations_strat = proptest::collection::vec(0u32..20, num_tasks);

        (deps_strat, durations_strat).prop_map(move |(raw_deps, durations)| {
            let mut defs = BTreeMap::new();
            for (i, (potential_deps, duration)) in raw_deps.into_iter().zip(durations).enumerate() {
                // Sanitize dependencies: only allow deps < i
                let deps: BTreeSet<TaskId> = if i == 0 {
                    BTreeSet::new()
                } else {
                    potential_deps.into_iter().map(|d| (d % i) as TaskId).collect()
                };
                let deps: Vec<TaskId> = deps.into_iter().collect();
                defs.insert(
                    i as TaskId,
                    TaskDef::new(format!("task_{i}"), f64::from(duration), &deps),
                );
            }
            defs
        })
    })
}

fn engine_for(defs: &BTreeMap<TaskId, TaskDef>) -> Engine {
    let engine = Engine::new();
    engine
        .define_project("generated", defs.clone())
        .expect("generated project must be valid");
    engine
}

/// Longest path ending at each task, computed directly from the
/// definitions (ids are already a topological order).
fn longest_ending_at(defs: &BTreeMap<TaskId, TaskDef>) -> BTreeMap<TaskId, f64> {
    let mut best = BTreeMap::new();
    for (&id, def) in defs {
        let upstream = def
            .dependencies
            .iter()
            .map(|d| best[d])
            .fold(0.0_f64, f64::max);
        best.insert(id, upstream + def.duration);
    }
    best
}

/// Minimum edge-weight distance from `start` to every reachable task.
fn distances_from(defs: &BTreeMap<TaskId, TaskDef>, start: TaskId) -> BTreeMap<TaskId, f64> {
    let mut dist = BTreeMap::new();
    dist.insert(start, 0.0);
    for (&id, def) in defs.range(start + 1..) {
        let best = def
            .dependencies
            .iter()
            .filter_map(|d| dist.get(d).map(|w: &f64| w + def.duration))
            .fold(None, |acc: Option<f64>, w| Some(acc.map_or(w, |a| a.min(w))));
        if let Some(w) = best {
            dist.insert(id, w);
        }
    }
    dist
}

proptest! {
    #[test]
    fn test_topological_order_respects_every_dependency(defs in dag_strategy(12)) {
        let engine = engine_for(&defs);

        let order = match engine.topological_order() {
            Outcome::Ready(order) => order,
            other => return Err(TestCaseError::fail(format!("expected an order, got {other:?}"))),
        };

        prop_assert_eq!(order.len(), defs.len());
        let position: BTreeMap<TaskId, usize> =
            order.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        for (id, def) in &defs {
            for dep in &def.dependencies {
                prop_assert!(position[dep] < position[id], "{} must come before {}", dep, id);
            }
        }
    }

    #[test]
    fn test_critical_path_is_a_maximal_chain(defs in dag_strategy(12)) {
        let engine = engine_for(&defs);
        let (path, total) = engine.critical_path().into_legacy();

        prop_assert!(!path.is_empty());

        // Consecutive tasks are linked by a dependency.
        for pair in path.windows(2) {
            prop_assert!(defs[&pair[1]].dependencies.contains(&pair[0]));
        }

        // The length is the sum of the durations along it.
        let sum: f64 = path.iter().map(|id| defs[id].duration).sum();
        prop_assert_eq!(total, sum);

        // No chain is longer.
        let best = longest_ending_at(&defs).into_values().fold(0.0_f64, f64::max);
        prop_assert_eq!(total, best);
    }

    #[test]
    fn test_shortest_paths_match_reference_distances(
        defs in dag_strategy(10),
        pick in any::<usize>(),
    ) {
        let engine = engine_for(&defs);
        let start = (pick % defs.len()) as TaskId;
        let dist = distances_from(&defs, start);

        for &end in defs.keys() {
            let (path, weight) = engine.shortest_path(start, end).unwrap().into_legacy();
            match dist.get(&end) {
                Some(&expected) => {
                    prop_assert_eq!(weight, expected);
                    prop_assert_eq!(path.first().copied(), Some(start));
                    prop_assert_eq!(path.last().copied(), Some(end));
                }
                None => {
                    prop_assert!(path.is_empty());
                    prop_assert_eq!(weight, 0.0);
                }
            }
        }

        let (path, weight) = engine.shortest_path(start, start).unwrap().into_legacy();
        prop_assert_eq!(path, vec![start]);
        prop_assert_eq!(weight, 0.0);
    }

    #[test]
    fn test_delays_never_shorten_the_critical_path(
        defs in dag_strategy(8),
        delays in proptest::collection::vec((any::<usize>(), 0u32..10), 1..5),
    ) {
        let engine = engine_for(&defs);
        let (_, mut previous) = engine.critical_path().into_legacy();

        for (pick, minutes) in delays {
            let task = (pick % defs.len()) as TaskId;
            let before = engine.task(task).map(|t| t.planned_duration).unwrap_or_default();

            engine.report_delay(task, f64::from(minutes)).unwrap();

            let after = engine.task(task).map(|t| t.planned_duration).unwrap_or_default();
            prop_assert_eq!(after, before + f64::from(minutes));

            let (_, length) = engine.critical_path().into_legacy();
            prop_assert!(length >= previous);
            previous = length;
        }
    }
}
