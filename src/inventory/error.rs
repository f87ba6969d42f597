use thiserror::Error;

/// Errors that can occur during inventory operations
///
/// None of these are fatal. A failed add may still have committed part of
/// the requested quantity; see [`InventoryError::committed`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// Zero quantity, unknown item ID, or a malformed restored slot
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Not every requested unit fit; the `placed` units stay in the inventory
    #[error("inventory is full (placed {placed} of {requested})")]
    CapacityExceeded { requested: u32, placed: u32 },

    /// Tried to remove more items than exist
    #[error("insufficient items (requested: {requested}, available: {available})")]
    InsufficientQuantity { requested: u32, available: u32 },
}

impl InventoryError {
    /// Units that were committed despite the failure
    pub fn committed(&self) -> u32 {
        match self {
            InventoryError::CapacityExceeded { placed, .. } => *placed,
            _ => 0,
        }
    }
}
