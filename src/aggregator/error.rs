//! Error types for the Total Aggregator.

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AggregateError {
    /// The running total would no longer be non-decreasing.
    #[error("Negative amount: {0}")]
    NegativeAmount(Decimal),

    /// The running total does not fit in a decimal any more.
    #[error("Running total overflow: {total} + {amount}")]
    Overflow { total: Decimal, amount: Decimal },
}
