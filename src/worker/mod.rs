//! # Order Worker
//!
//! Processing of a single [`Order`], run by the
//! [`Dispatcher`](crate::framework::Dispatcher) on its own task.
//!
//! ## Structure
//!
//! - [`detail`] - [`DetailRecord`] and its base64 encoding
//! - [`state`] - [`WorkerState`] machine
//! - [`error`] - [`WorkerError`]
//!
//! ## Steps
//!
//! 1. **Processing** - wait out the simulated fulfillment delay. This is the only
//!    suspension point and does not hold any lock.
//! 2. **Encoded** - build the detail record and encode it for the audit log.
//! 3. **Aggregated** - add the order total to the [`TotalAggregator`].
//! 4. **Done** - publish a [`Receipt`].
//!
//! Releasing the outstanding slot is not done here. It belongs to the framework's
//! worker shell, which releases it however `process` ends.

pub mod detail;
pub mod error;
pub mod state;

pub use detail::*;
pub use error::*;
pub use state::WorkerState;

use crate::aggregator::TotalAggregator;
use crate::framework::Job;
use crate::model::{Order, OrderId};
use async_trait::async_trait;
use rust_decimal::Decimal;
use state::Progress;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Dependencies shared by every order worker.
pub struct WorkerContext {
    pub aggregator: Arc<TotalAggregator>,
    pub processing_delay: Duration,
    /// Where finished orders are announced. `None` keeps workers silent.
    pub receipts: Option<mpsc::UnboundedSender<Receipt>>,
}

/// Announcement of a processed order.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub order_id: OrderId,
    pub item_name: String,
    pub quantity: u32,
    pub encoded_detail: String,
    /// Running total right after this order was added.
    pub running_total: Decimal,
    pub state: WorkerState,
}

#[async_trait]
impl Job for Order {
    type Context = WorkerContext;
    type Output = Receipt;
    type Error = WorkerError;

    fn label(&self) -> String {
        self.id().to_string()
    }

    async fn process(self, ctx: &WorkerContext) -> Result<Receipt, WorkerError> {
        let mut progress = Progress::new(self.id());

        progress.advance();
        tokio::time::sleep(ctx.processing_delay).await;

        let encoded_detail = DetailRecord::for_order(&self).encode();
        progress.advance();
        info!(order_id = %self.id(), detail = %encoded_detail, "Encoded order detail");

        let running_total = match ctx.aggregator.add(self.total_price()).await {
            Ok(total) => total,
            Err(e) => {
                progress.fail(&e);
                return Err(e.into());
            }
        };
        progress.advance();
        progress.finish();

        let receipt = Receipt {
            order_id: self.id(),
            item_name: self.item_name().to_string(),
            quantity: self.quantity(),
            encoded_detail,
            running_total,
            state: progress.state(),
        };

        if let Some(receipts) = &ctx.receipts {
            if receipts.send(receipt.clone()).is_err() {
                debug!(order_id = %self.id(), "Receipt listener gone");
            }
        }
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::AggregateError;
    use rust_decimal_macros::dec;

    fn order(id: u64, total: Decimal) -> Order {
        Order::new(OrderId(id), "Nasi Goreng".to_string(), 1, total, total)
    }

    fn context(aggregator: Arc<TotalAggregator>) -> (WorkerContext, mpsc::UnboundedReceiver<Receipt>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let ctx = WorkerContext {
            aggregator,
            processing_delay: Duration::from_millis(5),
            receipts: Some(tx),
        };
        (ctx, rx)
    }

    #[tokio::test]
    async fn test_process_aggregates_and_announces() {
        let aggregator = Arc::new(TotalAggregator::new());
        let (ctx, mut rx) = context(Arc::clone(&aggregator));

        let receipt = order(1, dec!(15000)).process(&ctx).await.unwrap();
        assert_eq!(receipt.state, WorkerState::Done);
        assert_eq!(receipt.running_total, dec!(15000));
        assert_eq!(
            DetailRecord::decode(&receipt.encoded_detail).unwrap().as_str(),
            "ID:1,Item:Nasi Goreng,Quantity:1,TotalPrice:15000.00"
        );

        assert_eq!(rx.recv().await, Some(receipt));
        assert_eq!(aggregator.read().await, dec!(15000));
    }

    #[tokio::test]
    async fn test_worker_without_listener_still_completes() {
        let aggregator = Arc::new(TotalAggregator::new());
        let ctx = WorkerContext {
            aggregator: Arc::clone(&aggregator),
            processing_delay: Duration::from_millis(5),
            receipts: None,
        };

        let receipt = order(3, dec!(12000)).process(&ctx).await.unwrap();
        assert_eq!(receipt.state, WorkerState::Done);
        assert_eq!(aggregator.read().await, dec!(12000));
    }

    #[tokio::test]
    async fn test_aggregation_failure_is_reported() {
        let aggregator = Arc::new(TotalAggregator::starting_at(Decimal::MAX));
        let (ctx, mut rx) = context(Arc::clone(&aggregator));

        let err = order(2, dec!(1)).process(&ctx).await.unwrap_err();
        assert!(matches!(err, WorkerError::Aggregation(AggregateError::Overflow { .. })));

        drop(ctx);
        assert_eq!(rx.recv().await, None, "failed orders must not be announced");
        assert_eq!(aggregator.read().await, Decimal::MAX);
    }
}
