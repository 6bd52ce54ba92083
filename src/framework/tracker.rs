//! # Completion Tracker
//!
//! Counts outstanding jobs so that shutdown can wait until every accepted job has
//! finished. This is the wait-group of the pipeline.
//!
//! The count is incremented by [`CompletionTracker::track`], which hands back a
//! [`CompletionGuard`]. The guard travels with the job through the queue and into the
//! worker, and decrements the count when it is dropped. Because release happens in
//! `Drop`, it runs on every exit path: success, error, panic, or a job that never got
//! dispatched at all.

use std::sync::Arc;
use tokio::sync::watch;
use tracing::trace;

/// Point-in-time view of the tracker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackerSnapshot {
    /// Jobs accepted but not yet finished.
    pub outstanding: usize,
    /// Jobs that reached `Done`.
    pub done: u64,
    /// Jobs that reached `Failed`.
    pub failed: u64,
    /// Jobs whose guard was dropped without ever being processed
    /// (e.g. the enqueue was refused).
    pub abandoned: u64,
}

/// Terminal state reported when releasing a guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Done,
    Failed,
}

/// Shared counter of outstanding jobs.
///
/// Cloning is cheap; all clones observe the same count.
#[derive(Clone)]
pub struct CompletionTracker {
    state: Arc<watch::Sender<TrackerSnapshot>>,
}

impl CompletionTracker {
    pub fn new() -> Self {
        let (state, _) = watch::channel(TrackerSnapshot::default());
        Self {
            state: Arc::new(state),
        }
    }

    /// Registers one more outstanding job.
    pub fn track(&self) -> CompletionGuard {
        self.state.send_modify(|s| s.outstanding += 1);
        trace!(outstanding = self.outstanding(), "Tracked");
        CompletionGuard {
            state: Arc::clone(&self.state),
            completion: None,
        }
    }

    pub fn outstanding(&self) -> usize {
        self.state.borrow().outstanding
    }

    pub fn snapshot(&self) -> TrackerSnapshot {
        *self.state.borrow()
    }

    /// Waits until no job is outstanding and returns the snapshot observed at that
    /// moment. Returns immediately if nothing is outstanding.
    pub async fn wait_idle(&self) -> TrackerSnapshot {
        let mut rx = self.state.subscribe();
        let snapshot = match rx.wait_for(|s| s.outstanding == 0).await {
            Ok(snapshot) => *snapshot,
            // Unreachable while `self` holds the sender.
            Err(_) => self.snapshot(),
        };
        snapshot
    }
}

impl Default for CompletionTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped release of one outstanding slot.
///
/// Call [`CompletionGuard::release`] to record how the job ended; simply dropping the
/// guard records it as abandoned. Either way the count goes down exactly once.
#[must_use = "dropping the guard immediately releases the outstanding slot"]
pub struct CompletionGuard {
    state: Arc<watch::Sender<TrackerSnapshot>>,
    completion: Option<Completion>,
}

impl CompletionGuard {
    pub fn release(mut self, completion: Completion) {
        self.completion = Some(completion);
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        let completion = self.completion;
        self.state.send_modify(|s| {
            s.outstanding -= 1;
            match completion {
                Some(Completion::Done) => s.done += 1,
                Some(Completion::Failed) => s.failed += 1,
                None => s.abandoned += 1,
            }
        });
    }
}

impl std::fmt::Debug for CompletionGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionGuard")
            .field("completion", &self.completion)
            .finish()
    }
}
