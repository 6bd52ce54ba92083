//! Pure data structures shared by the pipeline stages.

pub mod menu_item;
pub mod order;

pub use menu_item::*;
pub use order::*;
