//! # Dispatcher
//!
//! The consumer half of the pipeline. A single long-lived task takes jobs off the
//! [`JobQueue`] in FIFO order and fans each one out to its own worker task.

use super::error::FrameworkError;
use super::job::Job;
use super::queue::{Envelope, JobQueue};
use super::tracker::{Completion, CompletionTracker};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, error, info};

/// Fan-out loop over a [`JobQueue`].
///
/// # Concurrency Model
/// The dispatcher never processes a job itself and never waits for a worker. Each job
/// gets its own Tokio task, so completion order is independent of submission order.
///
/// The number of workers *processing* at once is capped by a semaphore. Permits are
/// acquired inside the worker task, not by the dispatcher, so a saturated pool delays
/// processing without stalling the drain loop.
///
/// # Usage Pattern
///
/// ```rust,ignore
/// let (dispatcher, queue) = Dispatcher::<MyJob>::new(10, 64);
/// let handle = tokio::spawn(dispatcher.run(context));
///
/// queue.enqueue(job).await?;
///
/// queue.close();
/// handle.await?;                    // dispatcher drained the buffer
/// queue.tracker().wait_idle().await; // every worker finished
/// ```
pub struct Dispatcher<J: Job> {
    receiver: mpsc::Receiver<Envelope<J>>,
    permits: Arc<Semaphore>,
}

impl<J: Job> Dispatcher<J> {
    /// Creates a dispatcher and the queue that feeds it.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Bounded buffer size. Must be non-zero.
    /// * `max_workers` - Upper bound on concurrently processing workers.
    pub fn new(capacity: usize, max_workers: usize) -> (Self, JobQueue<J>) {
        let (sender, receiver) = mpsc::channel(capacity);
        let dispatcher = Self {
            receiver,
            permits: Arc::new(Semaphore::new(max_workers)),
        };
        let queue = JobQueue::new(sender, CompletionTracker::new());
        (dispatcher, queue)
    }

    /// Runs the drain loop until the queue is closed and empty.
    ///
    /// The `context` is shared with every worker. Returns how many jobs were
    /// dispatched.
    pub async fn run(mut self, context: J::Context) -> usize {
        let job_type = std::any::type_name::<J>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(job_type, "Dispatcher started");

        let context = Arc::new(context);
        let mut dispatched = 0usize;

        while let Some(envelope) = self.receiver.recv().await {
            dispatched += 1;
            debug!(job_type, job = %envelope.job.label(), dispatched, "Dispatched");
            tokio::spawn(run_worker(
                envelope,
                Arc::clone(&context),
                Arc::clone(&self.permits),
            ));
        }

        info!(job_type, dispatched, "Dispatcher drained");
        dispatched
    }
}

/// Outermost frame of a worker task.
///
/// Everything that can go wrong inside `process` ends here as `Failed`; the guard is
/// released on every path. Nothing is returned: the dispatcher never joins workers.
async fn run_worker<J: Job>(envelope: Envelope<J>, context: Arc<J::Context>, permits: Arc<Semaphore>) {
    let Envelope { job, guard } = envelope;
    let label = job.label();

    let _permit = match permits.acquire_owned().await {
        Ok(permit) => permit,
        Err(_) => {
            let failure = FrameworkError::WorkerFailure {
                job: label,
                reason: "worker pool closed".to_string(),
            };
            error!(error = %failure, "Failed");
            guard.release(Completion::Failed);
            return;
        }
    };

    let result = AssertUnwindSafe(job.process(&*context)).catch_unwind().await;

    let reason = match result {
        Ok(Ok(output)) => {
            debug!(job = %label, ?output, "Done");
            guard.release(Completion::Done);
            return;
        }
        Ok(Err(e)) => e.to_string(),
        Err(panic) => format!("panicked: {}", panic_message(panic.as_ref())),
    };

    let failure = FrameworkError::WorkerFailure { job: label, reason };
    error!(error = %failure, "Failed");
    guard.release(Completion::Failed);
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
