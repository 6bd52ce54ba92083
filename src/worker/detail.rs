//! Detail records: the audit line written for every processed order.

use crate::model::Order;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt::Display;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DetailError {
    #[error("Detail record is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Detail record is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Human-readable summary of an order:
/// `ID:<id>,Item:<name>,Quantity:<qty>,TotalPrice:<total>` with the total at two
/// decimals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRecord(String);

impl DetailRecord {
    pub fn for_order(order: &Order) -> Self {
        Self(format!(
            "ID:{},Item:{},Quantity:{},TotalPrice:{:.2}",
            order.id().0,
            order.item_name(),
            order.quantity(),
            order.total_price()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Standard base64 of the record's UTF-8 bytes.
    pub fn encode(&self) -> String {
        STANDARD.encode(self.0.as_bytes())
    }

    pub fn decode(encoded: &str) -> Result<Self, DetailError> {
        let bytes = STANDARD.decode(encoded)?;
        Ok(Self(String::from_utf8(bytes)?))
    }
}

impl Display for DetailRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
