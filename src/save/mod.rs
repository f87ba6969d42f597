//! Save/Load system for inventories
//!
//! This module provides:
//! - JSON-based save files (human-readable, debuggable)
//! - Named saves in a per-user data directory
//! - Validation of loaded contents against the item catalog
//!
//! # Architecture
//!
//! - `types`: Save data structures and error types
//! - `manager`: SaveManager for file operations
//!
//! # Example Usage
//!
//! ```no_run
//! # use slotstack::{InventoryStore, ItemCatalog, SaveManager};
//! # fn main() -> Result<(), slotstack::SaveError> {
//! let catalog = ItemCatalog::create_default();
//! let store = InventoryStore::new(4);
//! let manager = SaveManager::new("saves")?;
//!
//! manager.save(&store, "slot_1")?;
//! let inventory = manager.load("slot_1", &catalog)?;
//! # Ok(())
//! # }
//! ```

pub mod manager;
pub mod types;

// Re-export commonly used types
pub use manager::SaveManager;
pub use types::*;
