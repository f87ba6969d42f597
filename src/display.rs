//! Fixed-slot inventory display model
//!
//! Holds what each of the `N` on-screen inventory cells should show. The
//! first `N` inventory slots map onto the cells in order; cells past the end
//! of the inventory are empty. Drawing the cells is left to the renderer.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, warn};

use crate::inventory::{InventoryStore, Subscription};
use crate::item::Slot;

/// What one display cell shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayCell {
    pub item_id: String,
    pub name: String,
    pub icon: Option<String>,
    pub quantity: u32,
}

impl DisplayCell {
    fn from_slot(slot: &Slot) -> Self {
        let item = slot.item();
        DisplayCell {
            item_id: item.id().to_string(),
            name: item.name().to_string(),
            icon: item.icon().map(str::to_string),
            quantity: slot.quantity(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotDisplay {
    cells: Vec<Option<DisplayCell>>,
}

impl SlotDisplay {
    /// Creates a display with `cell_count` empty cells
    pub fn new(cell_count: usize) -> Self {
        SlotDisplay {
            cells: vec![None; cell_count],
        }
    }

    pub fn cells(&self) -> &[Option<DisplayCell>] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&DisplayCell> {
        self.cells.get(index).and_then(Option::as_ref)
    }

    /// Number of cells currently showing an item
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Redraws every cell from an inventory snapshot
    pub fn refresh(&mut self, snapshot: &[Slot]) {
        self.cells.fill(None);

        for (index, (cell, slot)) in self.cells.iter_mut().zip(snapshot).enumerate() {
            if slot.item().icon().is_none() {
                warn!(item = slot.item().id(), slot = index, "no icon assigned for item");
            }
            *cell = Some(DisplayCell::from_slot(slot));
        }

        debug!(
            slots = snapshot.len(),
            cells = self.cells.len(),
            "inventory display updated"
        );
    }
}

/// Keeps `display` in sync with `store`
///
/// Refreshes once immediately and then after every inventory change, until
/// the returned subscription is dropped. Only a weak reference to the store
/// is held by the listener.
pub fn bind(store: &Arc<InventoryStore>, display: Arc<Mutex<SlotDisplay>>) -> Subscription {
    display
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .refresh(&store.snapshot());

    let weak = Arc::downgrade(store);
    store.subscribe(move || {
        let Some(store) = weak.upgrade() else {
            return;
        };
        let snapshot = store.snapshot();
        display
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .refresh(&snapshot);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Item, ItemDefinition};

    #[test]
    fn test_refresh_clears_stale_cells() {
        let a = Item::new(ItemDefinition::stackable("a", "A", 10).with_icon("a.png"));
        let store = InventoryStore::new(4);
        let mut display = SlotDisplay::new(4);

        store.add_item(&a, 25).unwrap();
        display.refresh(&store.snapshot());
        assert_eq!(display.occupied(), 3);
        assert_eq!(display.cell(2).map(|c| c.quantity), Some(5));

        store.remove_item(&a, 20).unwrap();
        display.refresh(&store.snapshot());
        assert_eq!(display.occupied(), 1);
        assert_eq!(display.cell(0).map(|c| c.quantity), Some(5));
        assert!(display.cell(1).is_none());
    }

    #[test]
    fn test_more_slots_than_cells() {
        let b = Item::new(ItemDefinition::single("b", "B"));
        let store = InventoryStore::new(4);
        store.add_item(&b, 4).unwrap();

        let mut display = SlotDisplay::new(2);
        display.refresh(&store.snapshot());
        assert_eq!(display.occupied(), 2);
        assert!(display.cell(0).unwrap().icon.is_none());
    }

    #[test]
    fn test_bind_follows_store() {
        let a = Item::new(ItemDefinition::stackable("a", "A", 10));
        let store = Arc::new(InventoryStore::new(4));
        store.add_item(&a, 3).unwrap();

        let display = Arc::new(Mutex::new(SlotDisplay::new(4)));
        let binding = bind(&store, Arc::clone(&display));
        // Eager refresh picks up existing contents
        assert_eq!(display.lock().unwrap().occupied(), 1);

        store.add_item(&a, 10).unwrap();
        assert_eq!(display.lock().unwrap().occupied(), 2);

        drop(binding);
        store.remove_item(&a, 13).unwrap();
        assert_eq!(display.lock().unwrap().occupied(), 2);
    }
}
