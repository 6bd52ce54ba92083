//! # Order Intake
//!
//! Turns a validated request (item name + quantity) into an [`Order`] by reserving
//! stock in the [`MenuStore`].
//!
//! Intake is the only place orders are created, and it runs on the single
//! interactive control flow. [`OrderIntake::place`] takes `&mut self`, so id
//! allocation cannot race even if the intake is shared by mistake.

pub mod error;

pub use error::*;

use crate::menu_store::MenuStore;
use crate::model::{Order, OrderId};
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub struct OrderIntake {
    store: Arc<MenuStore>,
    next_id: u64,
}

impl OrderIntake {
    pub fn new(store: Arc<MenuStore>) -> Self {
        Self { store, next_id: 1 }
    }

    /// Reserves stock and builds the order. Never retries.
    ///
    /// Ids are only consumed by successful orders, so accepted ids are 1, 2, 3, ...
    #[instrument(skip(self))]
    pub async fn place(&mut self, item_name: &str, quantity: u32) -> Result<Order, IntakeError> {
        if quantity == 0 {
            warn!("Rejected zero quantity");
            return Err(IntakeError::InvalidQuantity(quantity.to_string()));
        }

        let reservation = self.store.reserve(item_name, quantity).await?;

        let id = OrderId(self.next_id);
        self.next_id += 1;

        info!(order_id = %id, total = %reservation.total_price, "Order created");
        Ok(Order::new(
            id,
            reservation.item_name,
            quantity,
            reservation.unit_price,
            reservation.total_price,
        ))
    }
}
