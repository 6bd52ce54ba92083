//! Generic producer/consumer pipeline.
//!
//! This module provides the plumbing that moves units of work from a single producer to
//! concurrently running workers, independent of what the work is.
//!
//! # Main Components
//!
//! - [`Job`] - Trait that work items implement to be dispatched
//! - [`JobQueue`] - Bounded, closable submission queue (backpressure on full)
//! - [`Dispatcher`] - Drain loop that spawns one worker per job
//! - [`CompletionTracker`] - Outstanding-job counter used for drain on shutdown
//! - [`FrameworkError`] - Queue and worker errors

pub mod dispatcher;
pub mod error;
pub mod job;
pub mod queue;
pub mod tracker;

pub use dispatcher::Dispatcher;
pub use error::FrameworkError;
pub use job::Job;
pub use queue::JobQueue;
pub use tracker::{Completion, CompletionGuard, CompletionTracker, TrackerSnapshot};
