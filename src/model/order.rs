use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
///
/// Assigned by [`OrderIntake`](crate::intake::OrderIntake) in creation order,
/// starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u64);

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// An accepted order.
///
/// Orders are immutable: fields are private and only intake can build one. After
/// dispatch the order is moved into exactly one worker, so it is deliberately not
/// `Clone`. Callers that need to remember an order keep its [`OrderTicket`].
#[derive(Debug)]
pub struct Order {
    id: OrderId,
    item_name: String,
    quantity: u32,
    unit_price: Decimal,
    total_price: Decimal,
}

impl Order {
    pub(crate) fn new(
        id: OrderId,
        item_name: String,
        quantity: u32,
        unit_price: Decimal,
        total_price: Decimal,
    ) -> Self {
        Self {
            id,
            item_name,
            quantity,
            unit_price,
            total_price,
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price at the moment the stock was reserved.
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn total_price(&self) -> Decimal {
        self.total_price
    }

    pub fn ticket(&self) -> OrderTicket {
        OrderTicket {
            id: self.id,
            item_name: self.item_name.clone(),
            quantity: self.quantity,
            total_price: self.total_price,
        }
    }
}

/// Read-only summary of an order handed back to the submitter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderTicket {
    pub id: OrderId,
    pub item_name: String,
    pub quantity: u32,
    pub total_price: Decimal,
}
