// Inventory system module
//
// This module provides the slot/stack inventory, including:
// - Single-owner inventory storage with the stacking rules
// - A shareable store that serializes mutations and notifies listeners
// - Error kinds for failed adds and removes

pub mod error;
pub mod inventory;
pub mod store;

// Re-export main types
pub use error::InventoryError;
pub use inventory::{DEFAULT_CAPACITY, Inventory};
pub use store::{InventoryStore, Listener, Subscription};
