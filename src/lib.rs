//! Slot and stack inventory for a first-person prototype game.
//!
//! The [`Inventory`] holds a bounded, ordered list of occupied slots and
//! implements the stacking rules. [`InventoryStore`] shares it between
//! gameplay code and the display, serializing mutations and notifying
//! subscribers after every change. Items come from an [`ItemCatalog`];
//! [`interaction`] has the world objects that feed the inventory, [`display`]
//! the fixed-cell view of it and [`save`] its persistence.

pub mod config;
pub mod display;
pub mod interaction;
pub mod inventory;
pub mod item;
pub mod save;

pub use config::{ConfigError, InventoryConfig};
pub use display::SlotDisplay;
pub use inventory::{Inventory, InventoryError, InventoryStore, Subscription};
pub use item::{CatalogError, Item, ItemCatalog, ItemDefinition, Slot};
pub use save::{SaveError, SaveManager};
