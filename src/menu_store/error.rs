//! Error types for the Menu Store.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during menu operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MenuError {
    /// No item matches the requested name.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// The requested quantity exceeds the available stock.
    #[error("Insufficient stock for {item}: requested {requested}, available {available}")]
    InsufficientStock {
        item: String,
        requested: u32,
        available: u32,
    },

    /// Two menu entries share a name (case-insensitive).
    #[error("Duplicate menu item: {0}")]
    DuplicateItem(String),

    /// A menu entry has a zero or negative price.
    #[error("Invalid price for {item}: {price}")]
    InvalidPrice { item: String, price: Decimal },

    /// quantity × unit price does not fit in a decimal.
    #[error("Price overflow for {item} x{quantity}")]
    PriceOverflow { item: String, quantity: u32 },
}
