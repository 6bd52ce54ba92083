//! # The Job Abstraction
//!
//! A [`Job`] is a unit of work that is handed through the [`JobQueue`](super::JobQueue)
//! to the [`Dispatcher`](super::Dispatcher), which runs each job on its own task.

use async_trait::async_trait;
use std::fmt::Debug;

/// Trait that any unit of work must implement to be dispatched by the framework.
///
/// # Ownership
/// `process` takes `self` by value: once a job has been dispatched, the worker task
/// owns it exclusively and nothing else can observe or mutate it.
///
/// # Context
/// Dependencies are not stored in the job. They are injected once into [`Dispatcher::run`](super::Dispatcher::run) and
/// shared with every worker by reference.
///
/// # Errors
/// Failures are returned as values. The worker shell converts an `Err` (or a panic)
/// into the `Failed` terminal state and logs it; nothing unwinds into the dispatcher.
#[async_trait]
pub trait Job: Send + Sized + 'static {
    /// Shared dependencies injected into every worker.
    type Context: Send + Sync + 'static;

    /// What a successfully processed job produces.
    type Output: Send + Debug + 'static;

    /// Domain error returned by `process`.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Short human-readable identifier used in log lines (e.g. `order_3`).
    fn label(&self) -> String;

    /// Processes the job to completion.
    async fn process(self, ctx: &Self::Context) -> Result<Self::Output, Self::Error>;
}
