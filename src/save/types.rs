//! Save data types
//!
//! Inventory contents are stored by item ID and resolved back through the
//! catalog on load, since item identity does not survive a restart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::inventory::{Inventory, InventoryError};

/// Current save file version
pub const CURRENT_SAVE_VERSION: u32 = 1;

/// The root save file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveFile {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub capacity: usize,
    pub slots: Vec<SavedSlot>,
}

/// One inventory slot as stored on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSlot {
    pub item_id: String,
    pub quantity: u32,
}

impl SaveFile {
    /// Captures the contents of an inventory
    pub fn capture(inventory: &Inventory) -> Self {
        SaveFile {
            version: CURRENT_SAVE_VERSION,
            saved_at: Utc::now(),
            capacity: inventory.capacity(),
            slots: inventory
                .slots()
                .iter()
                .map(|slot| SavedSlot {
                    item_id: slot.item().id().to_string(),
                    quantity: slot.quantity(),
                })
                .collect(),
        }
    }
}

/// Summary of a save on disk, for listing
#[derive(Debug, Clone, PartialEq)]
pub struct SaveFileInfo {
    pub name: String,
    pub saved_at: DateTime<Utc>,
    pub slot_count: usize,
}

/// Error types for save/load operations
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("save not found: {0}")]
    NotFound(String),

    #[error("invalid save name: {0:?}")]
    InvalidName(String),

    #[error("unsupported save version: {0}")]
    InvalidVersion(u32),

    #[error("save refers to unknown item '{0}'")]
    UnknownItem(String),

    #[error("corrupted save data: {0}")]
    Corrupted(#[from] InventoryError),
}
