//! # System Lifecycle & Orchestration
//!
//! Starting, wiring and draining the order pipeline.
//!
//! ## The OrderSystem Pattern
//!
//! Components are simple on their own; wiring them together is where the complexity
//! lives. [`OrderSystem`] is the one place that:
//!
//! 1. **Creates state** - menu store, total aggregator, completion tracker
//! 2. **Injects context** - the dispatcher receives the [`WorkerContext`](crate::worker::WorkerContext)
//!    in `run(context)`, not at construction
//! 3. **Drains on shutdown** - close intake, join the dispatcher, wait for every worker
//!
//! ## Graceful Shutdown
//!
//! 1. **Close the queue** - further submissions fail with `QueueClosed`
//! 2. **Dispatcher drains** - buffered orders are still dispatched, then the loop ends
//! 3. **Wait for zero** - the completion tracker reaches zero once every worker is
//!    `Done` or `Failed`
//!
//! Exiting before step 3 would drop in-flight orders from the running total.
//!
//! ## Configuration & Tracing
//!
//! [`SystemConfig`] reads tuning knobs from the environment and [`setup_tracing`]
//! installs the log subscriber.

pub mod config;
pub mod order_system;
pub mod tracing;

pub use config::*;
pub use order_system::*;
pub use self::tracing::setup_tracing;
