//! # Job Queue
//!
//! The producer half of the pipeline: a bounded FIFO in front of the
//! [`Dispatcher`](super::Dispatcher).

use super::error::FrameworkError;
use super::job::Job;
use super::tracker::{CompletionGuard, CompletionTracker};
use std::sync::{Mutex, PoisonError};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// A job paired with the outstanding slot it occupies.
pub(crate) struct Envelope<J> {
    pub(crate) job: J,
    pub(crate) guard: CompletionGuard,
}

/// Bounded submission queue.
///
/// # Backpressure
/// [`enqueue`](JobQueue::enqueue) waits while the buffer is full, so a fast producer is
/// slowed to the dispatcher's pace instead of growing the buffer without bound.
///
/// # Closing
/// [`close`](JobQueue::close) drops the queue's sender. Jobs already buffered are still
/// delivered; the dispatcher exits once it has drained them. Any later `enqueue` fails
/// with [`FrameworkError::QueueClosed`].
pub struct JobQueue<J: Job> {
    sender: Mutex<Option<mpsc::Sender<Envelope<J>>>>,
    tracker: CompletionTracker,
}

impl<J: Job> JobQueue<J> {
    pub(crate) fn new(sender: mpsc::Sender<Envelope<J>>, tracker: CompletionTracker) -> Self {
        Self {
            sender: Mutex::new(Some(sender)),
            tracker,
        }
    }

    /// Submits a job, waiting for buffer space if the queue is full.
    ///
    /// The outstanding count is incremented before the job enters the buffer. If the
    /// submission is refused the increment is rolled back when the guard drops.
    pub async fn enqueue(&self, job: J) -> Result<(), FrameworkError> {
        let sender = self
            .sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(FrameworkError::QueueClosed)?;

        let label = job.label();
        let envelope = Envelope {
            job,
            guard: self.tracker.track(),
        };
        debug!(job = %label, free = sender.capacity(), "Enqueue");
        sender
            .send(envelope)
            .await
            .map_err(|_| FrameworkError::QueueClosed)
    }

    /// Closes the queue. Returns `false` if it was already closed.
    pub fn close(&self) -> bool {
        let closed = self
            .sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .is_some();
        if closed {
            info!(outstanding = self.tracker.outstanding(), "Queue closed");
        }
        closed
    }

    pub fn is_closed(&self) -> bool {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    /// The tracker counting this queue's outstanding jobs.
    pub fn tracker(&self) -> &CompletionTracker {
        &self.tracker
    }
}
