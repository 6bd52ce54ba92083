//! # Menu Store
//!
//! In-memory catalog of [`MenuItem`]s with stock tracking.
//!
//! ## Locking
//!
//! The whole catalog sits behind one mutex. Every operation takes it for its full
//! duration, so a [`reserve`](MenuStore::reserve) is atomic with respect to the lookup:
//! no other reservation can interleave between the stock check and the decrement.
//! The lock is never held while acquiring any other lock.
//!
//! ## Usage
//!
//! ```rust
//! use order_pipeline::menu_store::MenuStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MenuStore::default_menu();
//!     let reservation = store.reserve("nasi goreng", 3).await?;
//!     assert_eq!(reservation.item_name, "Nasi Goreng");
//!     assert_eq!(store.find_item("Nasi Goreng").await?.stock, 7);
//!     Ok(())
//! }
//! ```

pub mod error;

pub use error::*;

use crate::model::MenuItem;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Result of a successful stock reservation.
#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    /// Canonical item name as written on the menu.
    pub item_name: String,
    /// Unit price at the time of reservation.
    pub unit_price: Decimal,
    /// `quantity × unit_price`.
    pub total_price: Decimal,
}

/// Thread-safe menu catalog.
pub struct MenuStore {
    items: Mutex<Vec<MenuItem>>,
}

impl MenuStore {
    /// Builds a store from a list of items, preserving their order.
    ///
    /// # Errors
    /// - [`MenuError::DuplicateItem`] if two names collide case-insensitively
    /// - [`MenuError::InvalidPrice`] if a price is not positive
    pub fn new(items: Vec<MenuItem>) -> Result<Self, MenuError> {
        for (i, item) in items.iter().enumerate() {
            if item.unit_price <= Decimal::ZERO {
                return Err(MenuError::InvalidPrice {
                    item: item.name.clone(),
                    price: item.unit_price,
                });
            }
            if items[..i].iter().any(|earlier| earlier.matches(&item.name)) {
                return Err(MenuError::DuplicateItem(item.name.clone()));
            }
        }
        Ok(Self {
            items: Mutex::new(items),
        })
    }

    /// The house menu.
    pub fn default_menu() -> Self {
        Self {
            items: Mutex::new(vec![
                MenuItem::new("Nasi Goreng", dec!(15000), 10),
                MenuItem::new("Mie Ayam", dec!(12000), 8),
                MenuItem::new("Sate Ayam", dec!(20000), 5),
                MenuItem::new("Es Teh", dec!(5000), 20),
            ]),
        }
    }

    /// Consistent snapshot of every item, in menu order.
    pub async fn list_items(&self) -> Vec<MenuItem> {
        self.items.lock().await.clone()
    }

    /// Case-insensitive exact lookup.
    pub async fn find_item(&self, name: &str) -> Result<MenuItem, MenuError> {
        let items = self.items.lock().await;
        let found = items.iter().find(|item| item.matches(name)).cloned();
        debug!(name, found = found.is_some(), "Find item");
        found.ok_or_else(|| MenuError::ItemNotFound(name.trim().to_string()))
    }

    /// Atomically checks and decrements stock.
    ///
    /// On any error the store is left untouched.
    pub async fn reserve(&self, name: &str, quantity: u32) -> Result<Reservation, MenuError> {
        let mut items = self.items.lock().await;
        let item = items
            .iter_mut()
            .find(|item| item.matches(name))
            .ok_or_else(|| MenuError::ItemNotFound(name.trim().to_string()))?;

        if quantity > item.stock {
            warn!(item = %item.name, requested = quantity, available = item.stock, "Reservation rejected");
            return Err(MenuError::InsufficientStock {
                item: item.name.clone(),
                requested: quantity,
                available: item.stock,
            });
        }

        let total_price = item
            .unit_price
            .checked_mul(Decimal::from(quantity))
            .ok_or_else(|| MenuError::PriceOverflow {
                item: item.name.clone(),
                quantity,
            })?;

        item.stock -= quantity;
        info!(item = %item.name, quantity, remaining = item.stock, "Reserved");

        Ok(Reservation {
            item_name: item.name.clone(),
            unit_price: item.unit_price,
            total_price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_reserve_decrements_stock() {
        let store = MenuStore::default_menu();

        let reservation = store.reserve("Nasi Goreng", 3).await.unwrap();
        assert_eq!(reservation.unit_price, dec!(15000));
        assert_eq!(reservation.total_price, dec!(45000));

        let item = store.find_item("Nasi Goreng").await.unwrap();
        assert_eq!(item.stock, 7);
    }

    #[tokio::test]
    async fn test_reserve_more_than_stock_is_rejected() {
        let store = MenuStore::default_menu();

        let result = store.reserve("Nasi Goreng", 11).await;
        assert_eq!(
            result,
            Err(MenuError::InsufficientStock {
                item: "Nasi Goreng".to_string(),
                requested: 11,
                available: 10,
            })
        );
        assert_eq!(store.find_item("Nasi Goreng").await.unwrap().stock, 10);
    }

    #[tokio::test]
    async fn test_reserve_exact_stock_empties_item() {
        let store = MenuStore::default_menu();
        store.reserve("Sate Ayam", 5).await.unwrap();
        assert_eq!(store.find_item("Sate Ayam").await.unwrap().stock, 0);

        let again = store.reserve("Sate Ayam", 1).await;
        assert!(matches!(again, Err(MenuError::InsufficientStock { available: 0, .. })));
    }

    #[tokio::test]
    async fn test_lookup_is_case_insensitive() {
        let store = MenuStore::default_menu();
        let item = store.find_item("  mIE aYAM ").await.unwrap();
        assert_eq!(item.name, "Mie Ayam");

        let missing = store.find_item("Rendang").await;
        assert_eq!(missing, Err(MenuError::ItemNotFound("Rendang".to_string())));
    }

    #[tokio::test]
    async fn test_list_items_preserves_menu_order() {
        let store = MenuStore::default_menu();
        let names: Vec<_> = store
            .list_items()
            .await
            .into_iter()
            .map(|item| item.name)
            .collect();
        assert_eq!(names, ["Nasi Goreng", "Mie Ayam", "Sate Ayam", "Es Teh"]);
    }

    #[test]
    fn test_new_rejects_duplicates_and_bad_prices() {
        let dup = MenuStore::new(vec![
            MenuItem::new("Es Teh", dec!(5000), 1),
            MenuItem::new("ES TEH", dec!(6000), 1),
        ]);
        assert!(matches!(dup, Err(MenuError::DuplicateItem(name)) if name == "ES TEH"));

        let free = MenuStore::new(vec![MenuItem::new("Air Putih", dec!(0), 1)]);
        assert!(matches!(free, Err(MenuError::InvalidPrice { .. })));
    }

    #[tokio::test]
    async fn test_price_overflow_leaves_stock_untouched() {
        let store = MenuStore::new(vec![MenuItem::new("Caviar", Decimal::MAX, 5)]).unwrap();
        let result = store.reserve("Caviar", 2).await;
        assert!(matches!(result, Err(MenuError::PriceOverflow { quantity: 2, .. })));
        assert_eq!(store.find_item("Caviar").await.unwrap().stock, 5);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_reservations_never_oversell() {
        let store = Arc::new(MenuStore::default_menu());

        // 10 in stock, 8 concurrent requests of 3: at most 3 can succeed.
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.reserve("Nasi Goreng", 3).await })
            })
            .collect();

        let mut succeeded = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                succeeded += 1;
            }
        }

        assert_eq!(succeeded, 3);
        assert_eq!(store.find_item("Nasi Goreng").await.unwrap().stock, 1);
    }
}
