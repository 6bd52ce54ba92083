//! Error types for Order Intake.

use crate::menu_store::MenuError;
use thiserror::Error;

/// Reasons an order request is turned away.
///
/// All of these are recovered at the intake boundary: nothing is mutated and no
/// order id is consumed.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum IntakeError {
    /// The quantity is not a positive whole number.
    #[error("Invalid quantity: {0:?}")]
    InvalidQuantity(String),

    /// Lookup or reservation against the menu failed.
    #[error(transparent)]
    Menu(#[from] MenuError),
}
