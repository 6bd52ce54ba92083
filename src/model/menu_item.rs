use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An entry on the menu.
///
/// Names are unique under case-insensitive comparison. Stock only ever changes through
/// [`MenuStore::reserve`](crate::menu_store::MenuStore::reserve).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    #[serde(rename = "price")]
    pub unit_price: Decimal,
    pub stock: u32,
}

impl MenuItem {
    /// Creates a new MenuItem instance.
    ///
    /// # Arguments
    /// * `name` - Display name, also used for lookup
    /// * `unit_price` - Price of a single unit
    /// * `stock` - Units available
    pub fn new(name: impl Into<String>, unit_price: Decimal, stock: u32) -> Self {
        Self {
            name: name.into(),
            unit_price,
            stock,
        }
    }

    /// Case-insensitive name comparison used for every lookup.
    pub fn matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }
}
