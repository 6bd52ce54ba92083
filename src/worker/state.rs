//! Per-order worker state machine.

use crate::model::OrderId;
use std::fmt::Display;
use tracing::{debug, warn};

/// `Dispatched → Processing → Encoded → Aggregated → Done`, or `Failed` from any
/// non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Dispatched,
    Processing,
    Encoded,
    Aggregated,
    Done,
    Failed,
}

impl WorkerState {
    pub fn is_terminal(self) -> bool {
        matches!(self, WorkerState::Done | WorkerState::Failed)
    }

    /// The state that follows on success, if any.
    pub fn next(self) -> Option<WorkerState> {
        match self {
            WorkerState::Dispatched => Some(WorkerState::Processing),
            WorkerState::Processing => Some(WorkerState::Encoded),
            WorkerState::Encoded => Some(WorkerState::Aggregated),
            WorkerState::Aggregated => Some(WorkerState::Done),
            WorkerState::Done | WorkerState::Failed => None,
        }
    }
}

/// Tracks and logs one order's progress through [`WorkerState`].
#[derive(Debug)]
pub(crate) struct Progress {
    order_id: OrderId,
    state: WorkerState,
}

impl Progress {
    pub(crate) fn new(order_id: OrderId) -> Self {
        Self {
            order_id,
            state: WorkerState::Dispatched,
        }
    }

    pub(crate) fn state(&self) -> WorkerState {
        self.state
    }

    /// Moves to the next state.
    pub(crate) fn advance(&mut self) -> WorkerState {
        let from = self.state;
        // Terminal states stay put.
        self.state = from.next().unwrap_or(from);
        debug!(order_id = %self.order_id, ?from, to = ?self.state, "Worker transition");
        self.state
    }

    /// `Aggregated → Done`. Any other state is left as it is.
    pub(crate) fn finish(&mut self) -> WorkerState {
        if self.state == WorkerState::Aggregated {
            self.advance();
        }
        self.state
    }

    pub(crate) fn fail(&mut self, error: &impl Display) -> WorkerState {
        let from = self.state;
        if !from.is_terminal() {
            self.state = WorkerState::Failed;
        }
        warn!(order_id = %self.order_id, ?from, %error, "Worker failed");
        self.state
    }
}

// A worker that unwinds mid-way never reaches a terminal state on its own.
impl Drop for Progress {
    fn drop(&mut self) {
        if !self.state.is_terminal() {
            let from = self.state;
            self.state = WorkerState::Failed;
            debug!(order_id = %self.order_id, ?from, to = ?self.state, "Worker transition");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_reaches_done() {
        let mut progress = Progress::new(OrderId(1));
        let visited: Vec<_> = (0..5).map(|_| progress.advance()).collect();
        assert_eq!(
            visited,
            [
                WorkerState::Processing,
                WorkerState::Encoded,
                WorkerState::Aggregated,
                WorkerState::Done,
                WorkerState::Done,
            ]
        );
    }

    #[test]
    fn test_finish_only_from_aggregated() {
        let mut progress = Progress::new(OrderId(1));
        progress.advance();
        assert_eq!(progress.finish(), WorkerState::Processing, "cannot skip ahead");

        progress.advance();
        progress.advance();
        assert_eq!(progress.state(), WorkerState::Aggregated);
        assert_eq!(progress.finish(), WorkerState::Done);
        assert_eq!(progress.finish(), WorkerState::Done);
    }

    #[test]
    fn test_failure_is_terminal() {
        let mut progress = Progress::new(OrderId(1));
        progress.advance();
        assert_eq!(progress.fail(&"boom"), WorkerState::Failed);
        assert_eq!(progress.advance(), WorkerState::Failed);
        assert!(progress.state().is_terminal());
    }
}
