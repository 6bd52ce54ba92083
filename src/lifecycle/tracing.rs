//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging with the `tracing` crate.
//!
//! The console shares stdout with the log output, so the default level is `warn`:
//! rejected reservations and failed workers show up, routine traffic does not.
//!
//! ```bash
//! # Audit lines (encoded order details) and lifecycle events
//! RUST_LOG=info cargo run
//!
//! # Worker state transitions and queue traffic
//! RUST_LOG=debug cargo run
//!
//! # Only the pipeline plumbing
//! RUST_LOG=order_pipeline::framework=debug cargo run
//! ```
//!
//! With `RUST_LOG=debug` one order reads roughly:
//!
//! ```text
//! INFO place_order:place: Reserved item="Nasi Goreng" quantity=3 remaining=7
//! INFO place_order:place: Order created order_id=order_1 total=45000
//! DEBUG place_order: Enqueue job=order_1 free=10
//! DEBUG Dispatched job_type="Order" job=order_1 dispatched=1
//! DEBUG Worker transition order_id=order_1 from=Dispatched to=Processing
//! INFO Encoded order detail order_id=order_1 detail=SUQ6MSxJdGVtOk5hc2kgR29yZW5nLFF1YW50aXR5OjMsVG90YWxQcmljZTo0NTAwMC4wMA==
//! DEBUG Worker transition order_id=order_1 from=Aggregated to=Done
//! ```
use tracing_subscriber::EnvFilter;

pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
