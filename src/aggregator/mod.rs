//! # Total Aggregator
//!
//! The running sum of all processed orders. Many workers contend on it, so the
//! critical section is a single checked addition and nothing else.

pub mod error;

pub use error::*;

use rust_decimal::Decimal;
use tokio::sync::Mutex;
use tracing::trace;

#[derive(Debug, Default)]
pub struct TotalAggregator {
    total: Mutex<Decimal>,
}

impl TotalAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` and returns the new total. On error the total is unchanged.
    pub async fn add(&self, amount: Decimal) -> Result<Decimal, AggregateError> {
        if amount < Decimal::ZERO {
            return Err(AggregateError::NegativeAmount(amount));
        }
        let mut total = self.total.lock().await;
        *total = total
            .checked_add(amount)
            .ok_or(AggregateError::Overflow {
                total: *total,
                amount,
            })?;
        trace!(%amount, total = %*total, "Aggregated");
        Ok(*total)
    }

    /// Snapshot of the running total.
    pub async fn read(&self) -> Decimal {
        *self.total.lock().await
    }

    #[cfg(test)]
    pub(crate) fn starting_at(total: Decimal) -> Self {
        Self {
            total: Mutex::new(total),
        }
    }
}
