//! # Conversion Runner
//!
//! Schedules [`ConversionTask`]s on rayon's global worker pool and keeps
//! the at-most-one-current-task discipline: submitting a new task marks any
//! previous unfinished task canceled before the new one is spawned.
//!
//! Result delivery rides a zero-capacity channel, so the worker blocks in
//! `send` until the caller receives — a rendezvous handoff that needs no
//! further locking. A caller that supersedes a submission should drop the
//! superseded [`Submission`]; its task then finishes without delivering.

use std::sync::mpsc::{self, Receiver};

use crate::task::{ConversionOutcome, ConversionTask, TaskHandle};

/// What the caller holds after submitting a task.
pub struct Submission {
    /// Observe state or cancel explicitly.
    pub handle: TaskHandle,
    /// Receives the single outcome. Disconnects without a value when the
    /// task is canceled.
    pub receiver: Receiver<ConversionOutcome>,
}

/// Thread-pool-backed task runner with supersede-cancels semantics.
#[derive(Default)]
pub struct ConversionRunner {
    current: Option<TaskHandle>,
}

impl ConversionRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit a task for execution.
    ///
    /// Any previous not-yet-finished task is marked canceled first;
    /// cancellation is cooperative, so that task may still burn through an
    /// in-progress encode, but it will never deliver a result.
    pub fn submit(&mut self, task: ConversionTask) -> Submission {
        if let Some(prev) = self.current.take() {
            if !prev.is_finished() {
                prev.cancel();
            }
        }

        let handle = task.handle();
        let (tx, rx) = mpsc::sync_channel(0);
        rayon::spawn(move || task.run(tx));

        self.current = Some(handle.clone());
        Submission {
            handle,
            receiver: rx,
        }
    }

    /// Handle of the most recently submitted task, if any.
    pub fn current(&self) -> Option<&TaskHandle> {
        self.current.as_ref()
    }
}
