//! Error types for the Order Worker.

use crate::aggregator::AggregateError;
use thiserror::Error;

/// Errors that end a worker in the `Failed` state.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum WorkerError {
    #[error("Aggregation failed: {0}")]
    Aggregation(#[from] AggregateError),
}
