//! # Framework Errors
//!
//! Errors raised by the pipeline plumbing itself (queue, dispatcher, worker shell),
//! as opposed to the domain errors of the jobs flowing through it.

/// Errors that can occur within the pipeline framework.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum FrameworkError {
    /// The queue was closed before the job could be submitted.
    #[error("Queue closed")]
    QueueClosed,
    /// A worker ended in the `Failed` state.
    #[error("Worker failure for {job}: {reason}")]
    WorkerFailure { job: String, reason: String },
    /// The dispatcher task itself died (panicked or was aborted).
    #[error("Dispatcher failed: {0}")]
    DispatcherFailed(String),
}
