use tracing::{debug, info, warn};

use super::error::InventoryError;
use crate::item::{Item, Slot};

/// Default number of slots in a player inventory
pub const DEFAULT_CAPACITY: usize = 4;

/// Ordered, capacity-bounded slot storage
///
/// This is the core storage structure. It holds only occupied slots, in
/// insertion order: a slot is appended when opened and removed the moment its
/// quantity reaches zero. It has a single owner; use
/// [`InventoryStore`](super::InventoryStore) to share it and get change
/// notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    slots: Vec<Slot>,
    capacity: usize,
}

impl Inventory {
    /// Creates a new empty inventory with the specified capacity
    pub fn new(capacity: usize) -> Self {
        Inventory {
            slots: Vec::new(),
            capacity,
        }
    }

    /// Rebuilds an inventory from `(item, quantity)` pairs in slot order
    ///
    /// Every pair must satisfy the slot invariants, and there may be no more
    /// pairs than `capacity`. Nothing is preallocated from `capacity`.
    pub fn restore(
        capacity: usize,
        slots: impl IntoIterator<Item = (Item, u32)>,
    ) -> Result<Self, InventoryError> {
        if capacity == 0 {
            return Err(InventoryError::InvalidArgument(
                "capacity must be at least 1".to_string(),
            ));
        }
        let mut inventory = Self::new(capacity);

        for (index, (item, quantity)) in slots.into_iter().enumerate() {
            if index >= capacity {
                return Err(InventoryError::InvalidArgument(format!(
                    "more than {capacity} slots"
                )));
            }
            if quantity == 0 || quantity > item.max_stack() {
                return Err(InventoryError::InvalidArgument(format!(
                    "slot {index}: quantity {quantity} of '{}' outside 1..={}",
                    item.id(),
                    item.max_stack()
                )));
            }
            inventory.slots.push(Slot::new(item, quantity));
        }

        Ok(inventory)
    }

    /// Maximum number of slots
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the inventory has no items
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns true if every slot is occupied
    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }

    /// Occupied slots in order; index 0 is the first display slot
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Counts how many of a specific item are in the inventory
    pub fn count_item(&self, item: &Item) -> u32 {
        self.slots
            .iter()
            .filter(|slot| slot.item() == item)
            .fold(0u32, |total, slot| total.saturating_add(slot.quantity()))
    }

    /// Checks if there are at least `quantity` of an item
    pub fn contains(&self, item: &Item, quantity: u32) -> bool {
        self.count_item(item) >= quantity
    }

    /// Adds items to the inventory
    ///
    /// # Strategy
    /// - Non-stackable items take one new slot per unit.
    /// - Stackable items first top up existing slots of the same item in
    ///   order, then open new slots at the end.
    ///
    /// Whatever fits is kept even when the call fails with
    /// [`InventoryError::CapacityExceeded`]; the error reports how much was
    /// placed.
    pub fn add_item(&mut self, item: &Item, quantity: u32) -> Result<(), InventoryError> {
        if quantity == 0 {
            debug!(item = item.id(), "rejected add of zero quantity");
            return Err(InventoryError::InvalidArgument(
                "cannot add zero quantity".to_string(),
            ));
        }

        debug!(
            item = item.id(),
            quantity,
            slots = self.slots.len(),
            capacity = self.capacity,
            "adding items"
        );

        let remaining = if item.is_stackable() {
            self.add_stackable(item, quantity)
        } else {
            self.add_single(item, quantity)
        };

        if remaining > 0 {
            let placed = quantity - remaining;
            warn!(
                item = item.id(),
                placed,
                dropped = remaining,
                "not enough inventory slots"
            );
            return Err(InventoryError::CapacityExceeded {
                requested: quantity,
                placed,
            });
        }

        info!(
            item = item.id(),
            quantity,
            slots = self.slots.len(),
            capacity = self.capacity,
            "added items"
        );
        Ok(())
    }

    /// One slot per unit. Returns how many units didn't fit.
    fn add_single(&mut self, item: &Item, quantity: u32) -> u32 {
        let available = self.capacity.saturating_sub(self.slots.len());
        let to_add = (quantity as usize).min(available);

        for _ in 0..to_add {
            self.slots.push(Slot::new(item.clone(), 1));
        }

        quantity - to_add as u32
    }

    /// Fill existing stacks, then open new ones. Returns how many units didn't fit.
    fn add_stackable(&mut self, item: &Item, quantity: u32) -> u32 {
        let mut remaining = quantity;

        // Phase 1: Top up existing stacks, in slot order
        for index in 0..self.slots.len() {
            if remaining == 0 {
                break;
            }

            let slot = &self.slots[index];
            if slot.item() != item || slot.is_full() {
                continue;
            }

            let (updated, overflow) = slot.with_added(remaining);
            self.slots[index] = updated;
            remaining = overflow;
        }

        // Phase 2: Open new stacks at the end while there is room
        while remaining > 0 && self.slots.len() < self.capacity {
            let stack_size = remaining.min(item.max_stack());
            self.slots.push(Slot::new(item.clone(), stack_size));
            remaining -= stack_size;
        }

        remaining
    }

    /// Removes items from the inventory
    ///
    /// Either the full quantity is removed or nothing changes. Slots are
    /// drained from the end toward the start, so the newest stacks go first,
    /// and emptied slots are dropped without reordering the rest.
    pub fn remove_item(&mut self, item: &Item, quantity: u32) -> Result<(), InventoryError> {
        if quantity == 0 {
            debug!(item = item.id(), "rejected remove of zero quantity");
            return Err(InventoryError::InvalidArgument(
                "cannot remove zero quantity".to_string(),
            ));
        }

        let available = self.count_item(item);
        if available < quantity {
            warn!(
                item = item.id(),
                requested = quantity,
                available,
                "not enough items to remove"
            );
            return Err(InventoryError::InsufficientQuantity {
                requested: quantity,
                available,
            });
        }

        let mut remaining = quantity;
        for index in (0..self.slots.len()).rev() {
            if remaining == 0 {
                break;
            }
            if self.slots[index].item() != item {
                continue;
            }

            let (rest, taken) = self.slots[index].with_taken(remaining);
            remaining -= taken;

            match rest {
                Some(slot) => self.slots[index] = slot,
                None => {
                    self.slots.remove(index);
                }
            }
        }

        info!(item = item.id(), quantity, slots = self.slots.len(), "removed items");
        Ok(())
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
