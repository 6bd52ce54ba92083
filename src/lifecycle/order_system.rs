use crate::aggregator::TotalAggregator;
use crate::framework::{CompletionTracker, Dispatcher, FrameworkError, JobQueue};
use crate::intake::{IntakeError, OrderIntake};
use crate::lifecycle::SystemConfig;
use crate::menu_store::{MenuError, MenuStore};
use crate::model::{MenuItem, Order, OrderTicket};
use crate::worker::{Receipt, WorkerContext};
use rust_decimal::Decimal;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument};

/// Errors surfaced by [`OrderSystem`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The request was turned away at intake (unknown item, bad quantity, no stock).
    #[error(transparent)]
    Intake(#[from] IntakeError),

    /// The pipeline refused the order or failed while shutting down.
    #[error(transparent)]
    Pipeline(#[from] FrameworkError),
}

/// Final numbers reported once the pipeline has drained.
#[derive(Debug, Clone, PartialEq)]
pub struct ShutdownReport {
    pub dispatched: usize,
    pub done: u64,
    pub failed: u64,
    pub total: Decimal,
}

/// Process-scoped context for the order pipeline.
///
/// `OrderSystem` is responsible for:
/// - **Ownership**: the menu, the running total and the outstanding count each live
///   here behind their own lock, instead of as globals.
/// - **Wiring**: intake feeds the queue; the dispatcher gets the worker context
///   injected when it starts.
/// - **Drain**: [`shutdown`](OrderSystem::shutdown) does not return while any order
///   is still being processed.
///
/// # Example
///
/// ```rust,ignore
/// let mut system = OrderSystem::new(&SystemConfig::default(), MenuStore::default_menu());
///
/// let ticket = system.place_order("Nasi Goreng", 3).await?;
///
/// let report = system.shutdown().await?;
/// assert_eq!(report.total, ticket.total_price);
/// ```
pub struct OrderSystem {
    store: Arc<MenuStore>,
    intake: OrderIntake,
    aggregator: Arc<TotalAggregator>,
    queue: JobQueue<Order>,
    tracker: CompletionTracker,
    dispatcher: JoinHandle<usize>,
}

impl OrderSystem {
    /// Creates the system and starts its dispatcher. Workers publish no receipts.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: &SystemConfig, store: MenuStore) -> Self {
        Self::start(config, store, None)
    }

    /// Like [`new`](OrderSystem::new), but every order that reaches `Done` is also
    /// published as a [`Receipt`]. The stream ends once the system has drained.
    pub fn with_receipts(config: &SystemConfig, store: MenuStore) -> (Self, mpsc::UnboundedReceiver<Receipt>) {
        let (receipt_tx, receipt_rx) = mpsc::unbounded_channel();
        (Self::start(config, store, Some(receipt_tx)), receipt_rx)
    }

    fn start(config: &SystemConfig, store: MenuStore, receipts: Option<mpsc::UnboundedSender<Receipt>>) -> Self {
        let store = Arc::new(store);
        let aggregator = Arc::new(TotalAggregator::new());

        let (dispatcher, queue) = Dispatcher::<Order>::new(config.queue_capacity, config.max_workers);
        let tracker = queue.tracker().clone();

        let context = WorkerContext {
            aggregator: Arc::clone(&aggregator),
            processing_delay: config.processing_delay,
            receipts,
        };
        let dispatcher = tokio::spawn(dispatcher.run(context));

        info!(
            queue_capacity = config.queue_capacity,
            max_workers = config.max_workers,
            delay_ms = config.processing_delay.as_millis() as u64,
            "Order system started"
        );

        Self {
            intake: OrderIntake::new(Arc::clone(&store)),
            store,
            aggregator,
            queue,
            tracker,
            dispatcher,
        }
    }

    /// Validates, reserves and submits an order.
    ///
    /// Waits if the queue is full. Returns a ticket describing the accepted order;
    /// processing continues in the background.
    #[instrument(skip(self))]
    pub async fn place_order(&mut self, item_name: &str, quantity: u32) -> Result<OrderTicket, OrderError> {
        let order = self.intake.place(item_name, quantity).await?;
        let ticket = order.ticket();

        if let Err(e) = self.queue.enqueue(order).await {
            // Reserved stock is not returned: the queue only closes during shutdown.
            error!(order_id = %ticket.id, error = %e, "Order accepted after intake closed");
            return Err(e.into());
        }
        debug!(order_id = %ticket.id, outstanding = self.tracker.outstanding(), "Order submitted");
        Ok(ticket)
    }

    /// Snapshot of the menu.
    pub async fn menu(&self) -> Vec<MenuItem> {
        self.store.list_items().await
    }

    /// Case-insensitive menu lookup.
    pub async fn find_item(&self, name: &str) -> Result<MenuItem, MenuError> {
        self.store.find_item(name).await
    }

    /// Running total of every order processed so far.
    pub async fn total(&self) -> Decimal {
        self.aggregator.read().await
    }

    /// Orders accepted but not yet finished.
    pub fn outstanding(&self) -> usize {
        self.tracker.outstanding()
    }

    /// Closes intake and drains the pipeline.
    ///
    /// # Shutdown Process
    ///
    /// 1. Close the queue so no further orders are accepted.
    /// 2. Wait for the dispatcher to hand out everything still buffered.
    /// 3. Wait until the outstanding count is zero, i.e. every worker is `Done` or
    ///    `Failed`.
    ///
    /// The drain in step 3 happens even if the dispatcher task died, so no accepted
    /// order is silently dropped from the total.
    pub async fn shutdown(self) -> Result<ShutdownReport, OrderError> {
        info!(outstanding = self.tracker.outstanding(), "Shutting down order system...");

        self.queue.close();
        let dispatched = self.dispatcher.await;
        let snapshot = self.tracker.wait_idle().await;
        let total = self.aggregator.read().await;

        let dispatched = match dispatched {
            Ok(count) => count,
            Err(e) => {
                error!(error = %e, "Dispatcher task failed");
                return Err(FrameworkError::DispatcherFailed(e.to_string()).into());
            }
        };

        info!(
            dispatched,
            done = snapshot.done,
            failed = snapshot.failed,
            %total,
            "Order system shutdown complete."
        );
        Ok(ShutdownReport {
            dispatched,
            done: snapshot.done,
            failed: snapshot.failed,
            total,
        })
    }
}
