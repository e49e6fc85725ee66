use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use taskplan::engine::{Decision, DecisionSource, TimerExpired};
use taskplan::errors::{Result, TaskplanError};

/// A fake decision source that:
/// - records every prompt it receives
/// - answers with the next scripted decision
/// - reports `Cancelled` once the script runs out.
pub struct ScriptedDecisions {
    script: VecDeque<Decision>,
    prompts: Arc<Mutex<Vec<TimerExpired>>>,
}

impl ScriptedDecisions {
    pub fn new(script: impl IntoIterator<Item = Decision>) -> Self {
        Self {
            script: script.into_iter().collect(),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared view of the prompts seen so far.
    pub fn prompts(&self) -> Arc<Mutex<Vec<TimerExpired>>> {
        Arc::clone(&self.prompts)
    }
}

impl DecisionSource for ScriptedDecisions {
    fn decide(
        &mut self,
        prompt: TimerExpired,
    ) -> Pin<Box<dyn Future<Output = Result<Decision>> + Send + '_>> {
        let task = prompt.task;
        self.prompts.lock().unwrap().push(prompt);
        let next = self.script.pop_front();

        Box::pin(async move { next.ok_or(TaskplanError::Cancelled(task)) })
    }
}

/// A decision source that never answers; useful for cancellation tests.
pub struct NeverDecides;

impl DecisionSource for NeverDecides {
    fn decide(
        &mut self,
        _prompt: TimerExpired,
    ) -> Pin<Box<dyn Future<Output = Result<Decision>> + Send + '_>> {
        Box::pin(std::future::pending())
    }
}
