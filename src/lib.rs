//! # Order Pipeline
//!
//! > **An in-memory restaurant order simulator built around a concurrent pipeline.**
//!
//! Orders are accepted on a single interactive control flow, reserved against an
//! in-memory menu, and handed through a bounded queue to a dispatcher that runs each
//! one on its own Tokio task. Every worker waits out a simulated fulfillment delay,
//! encodes an audit record and adds the order to a running total.
//!
//! ## 🏗️ Design
//!
//! ### Shared State, One Lock Each
//! The menu, the running total and the outstanding-order count are separate pieces of
//! state, each behind its own lock. No code path holds two of them at once, so there is
//! no lock ordering to get wrong.
//!
//! ### Backpressure
//! The queue is bounded. When it is full, submitting waits until the dispatcher makes
//! room, rather than dropping orders or growing without limit.
//!
//! ### Drain on Shutdown
//! Each accepted order carries a completion guard from the moment it is queued until
//! its worker finishes. Shutdown closes the queue and then waits for the count of live
//! guards to reach zero, so no in-flight order is lost from the total.
//!
//! ### Failures Stay Local
//! Workers return `Result`s. The worker shell turns an error (or a panic) into the
//! `Failed` state, logs it, and still releases the order's guard. Neither the
//! dispatcher nor other workers are affected.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! Generic plumbing: [`Job`](framework::Job), [`JobQueue`](framework::JobQueue),
//! [`Dispatcher`](framework::Dispatcher), [`CompletionTracker`](framework::CompletionTracker).
//!
//! ### 2. The Domain ([`model`], [`menu_store`], [`intake`], [`worker`], [`aggregator`])
//! Menu items and orders, stock reservation, order creation, per-order processing and
//! the running total.
//!
//! ### 3. The Orchestrator ([`lifecycle`])
//! [`OrderSystem`](lifecycle::OrderSystem) wires everything together and owns the
//! shutdown protocol. Configuration and tracing setup live here too.
//!
//! ### 4. The Front End ([`console`])
//! Menu-driven text UI and input parsing.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run with audit logs
//! RUST_LOG=info cargo run
//!
//! # Faster simulated kitchen
//! ORDER_PROCESSING_DELAY_MS=200 cargo run
//! ```

#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]

pub mod aggregator;
pub mod console;
pub mod framework;
pub mod intake;
pub mod lifecycle;
pub mod menu_store;
pub mod model;
pub mod worker;
