// src/engine/mod.rs

//! Scheduling engine.
//!
//! - [`core`] is the synchronous project state: task set, current graph
//!   snapshot, execution tracker and cached analysis. No locking, no async.
//! - [`handle`] wraps the core in the shareable [`Engine`] that drivers
//!   talk to; readers work on graph snapshots, writers swap whole graphs.
//! - [`runtime`] implements the timed, cancellable execution step.
//! - [`decision`] abstracts where "completed / delayed" answers come from.

use std::str::FromStr;
use std::time::Duration;

use crate::types::{Minutes, TaskId, is_valid_minutes};

/// Answer to "time is up for this task, is it done?".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    /// The task finished and actually took `actual_duration` minutes.
    Complete { actual_duration: Minutes },
    /// The task needs `minutes` more.
    Delay { minutes: Minutes },
}

impl FromStr for Decision {
    type Err = String;

    /// Accepts `done <minutes>` / `yes <minutes>` and `delay <minutes>` /
    /// `no <minutes>`. Minutes must be finite and not negative.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let verb = parts.next().unwrap_or_default().to_lowercase();
        let minutes = parts
            .next()
            .ok_or_else(|| format!("missing minutes in {s:?}"))?
            .parse::<Minutes>()
            .map_err(|e| format!("invalid minutes in {s:?}: {e}"))?;
        if !is_valid_minutes(minutes) {
            return Err(format!(
                "invalid minutes in {s:?}: must be a finite number >= 0"
            ));
        }

        match verb.as_str() {
            "done" | "yes" | "complete" => Ok(Decision::Complete {
                actual_duration: minutes,
            }),
            "delay" | "no" => Ok(Decision::Delay { minutes }),
            other => Err(format!(
                "unknown answer {other:?} (expected \"done <minutes>\" or \"delay <minutes>\")"
            )),
        }
    }
}

/// Emitted to the decision source once a task's planned time has elapsed.
#[derive(Debug, Clone, PartialEq)]
pub struct TimerExpired {
    pub task: TaskId,
    pub name: String,
    pub planned_duration: Minutes,
    /// Number of delays already applied during this run.
    pub round: u32,
}

/// Result of a timed execution step.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Completed(crate::tracker::CompletionRecord),
    /// Cancelled before a decision was applied; nothing was recorded.
    Cancelled,
}

/// Options for the timed execution step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExecutionOptions {
    /// Wall-clock seconds per planned minute.
    pub seconds_per_minute: f64,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            seconds_per_minute: 60.0,
        }
    }
}

impl ExecutionOptions {
    /// Wall-clock time to wait for `minutes` of planned work.
    pub fn wait_for(&self, minutes: Minutes) -> Duration {
        Duration::try_from_secs_f64(minutes * self.seconds_per_minute).unwrap_or(Duration::MAX)
    }
}

pub mod core;
pub mod decision;
pub mod handle;
pub mod runtime;

pub use self::core::ProjectState;
pub use decision::{ChannelDecisionSource, DecisionSource};
pub use handle::Engine;
pub use runtime::run_and_await_outcome;
