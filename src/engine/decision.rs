// src/engine/decision.rs

//! Where completion decisions come from.
//!
//! The timed execution step talks to a `DecisionSource` instead of reading
//! a terminal. Production drivers use [`ChannelDecisionSource`] and answer
//! from wherever they like (stdin, an HTTP handler); tests plug in scripted
//! sources.

use std::future::Future;
use std::pin::Pin;

use tokio::sync::mpsc;
use tracing::debug;

use crate::engine::{Decision, TimerExpired};
use crate::errors::{Result, TaskplanError};

/// Supplies the answer once a task's planned time has run out.
pub trait DecisionSource: Send {
    /// Resolve to the decision for `prompt.task`.
    ///
    /// Returning [`TaskplanError::Cancelled`] abandons the run without
    /// recording anything.
    fn decide(
        &mut self,
        prompt: TimerExpired,
    ) -> Pin<Box<dyn Future<Output = Result<Decision>> + Send + '_>>;
}

/// Channel-backed source: prompts go out on one channel, decisions come
/// back on another.
#[derive(Debug)]
pub struct ChannelDecisionSource {
    prompts: mpsc::Sender<TimerExpired>,
    decisions: mpsc::Receiver<Decision>,
}

impl ChannelDecisionSource {
    /// Create a source plus the driver-side ends: a receiver of prompts
    /// and a sender for decisions.
    pub fn channel(
        buffer: usize,
    ) -> (
        Self,
        mpsc::Receiver<TimerExpired>,
        mpsc::Sender<Decision>,
    ) {
        let (prompt_tx, prompt_rx) = mpsc::channel(buffer);
        let (decision_tx, decision_rx) = mpsc::channel(buffer);
        (
            Self {
                prompts: prompt_tx,
                decisions: decision_rx,
            },
            prompt_rx,
            decision_tx,
        )
    }
}

impl DecisionSource for ChannelDecisionSource {
    fn decide(
        &mut self,
        prompt: TimerExpired,
    ) -> Pin<Box<dyn Future<Output = Result<Decision>> + Send + '_>> {
        Box::pin(async move {
            let task = prompt.task;
            if self.prompts.send(prompt).await.is_err() {
                // Nobody is listening for prompts; decisions may still be
                // pushed without one.
                debug!(task, "prompt receiver dropped");
            }
            self.decisions
                .recv()
                .await
                .ok_or(TaskplanError::Cancelled(task))
        })
    }
}
