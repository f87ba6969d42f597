use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tracing::{debug, warn};

use super::error::InventoryError;
use super::inventory::Inventory;
use crate::item::{Item, ItemCatalog, Slot};

/// Callback run after the inventory changes
pub type Listener = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct ListenerList {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shared inventory with change notification
///
/// Wraps an [`Inventory`] behind a single lock so that adds and removes are
/// serialized, and keeps the list of change listeners. Gameplay code receives
/// a reference (usually an `Arc<InventoryStore>`) to the one store it works
/// on.
///
/// Listeners are called synchronously, after the mutation is committed and
/// the inventory lock is released, so a listener may read the store (for
/// example with [`snapshot`](Self::snapshot)) without deadlocking.
pub struct InventoryStore {
    inventory: Mutex<Inventory>,
    listeners: Arc<Mutex<ListenerList>>,
}

impl InventoryStore {
    /// Creates a store around a new empty inventory
    pub fn new(capacity: usize) -> Self {
        Self::from_inventory(Inventory::new(capacity))
    }

    /// Creates a store around existing contents, e.g. a loaded save
    pub fn from_inventory(inventory: Inventory) -> Self {
        InventoryStore {
            inventory: Mutex::new(inventory),
            listeners: Arc::new(Mutex::new(ListenerList::default())),
        }
    }

    /// Adds items; see [`Inventory::add_item`]
    ///
    /// Listeners are notified once if any unit was placed, including when the
    /// call fails with [`InventoryError::CapacityExceeded`] after a partial
    /// add.
    pub fn add_item(&self, item: &Item, quantity: u32) -> Result<(), InventoryError> {
        let result = lock(&self.inventory).add_item(item, quantity);

        let placed = match &result {
            Ok(()) => quantity,
            Err(err) => err.committed(),
        };
        if placed > 0 {
            self.notify();
        }

        result
    }

    /// Adds items looked up by catalog ID
    ///
    /// An unknown ID is reported as [`InventoryError::InvalidArgument`].
    pub fn add_item_by_id(
        &self,
        catalog: &ItemCatalog,
        item_id: &str,
        quantity: u32,
    ) -> Result<(), InventoryError> {
        let Some(item) = catalog.get(item_id) else {
            warn!(item = item_id, "trying to add unknown item to inventory");
            return Err(InventoryError::InvalidArgument(format!(
                "unknown item '{item_id}'"
            )));
        };
        self.add_item(&item, quantity)
    }

    /// Removes items; see [`Inventory::remove_item`]
    ///
    /// Listeners are notified only on success.
    pub fn remove_item(&self, item: &Item, quantity: u32) -> Result<(), InventoryError> {
        let result = lock(&self.inventory).remove_item(item, quantity);
        if result.is_ok() {
            self.notify();
        }
        result
    }

    /// Current slots in order
    pub fn snapshot(&self) -> Vec<Slot> {
        lock(&self.inventory).slots().to_vec()
    }

    /// Runs `f` with read access to the inventory
    pub fn with_inventory<R>(&self, f: impl FnOnce(&Inventory) -> R) -> R {
        f(&*lock(&self.inventory))
    }

    pub fn count_item(&self, item: &Item) -> u32 {
        lock(&self.inventory).count_item(item)
    }

    pub fn len(&self) -> usize {
        lock(&self.inventory).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.inventory).is_empty()
    }

    pub fn capacity(&self) -> usize {
        lock(&self.inventory).capacity()
    }

    /// Registers a change listener
    ///
    /// The listener stays registered until the returned [`Subscription`] is
    /// dropped or explicitly unsubscribed.
    pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) -> Subscription {
        let mut list = lock(&self.listeners);
        let id = list.next_id;
        list.next_id += 1;
        list.entries.push((id, Arc::new(listener)));
        debug!(id, listeners = list.entries.len(), "listener subscribed");

        Subscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    /// Number of currently registered listeners
    pub fn listener_count(&self) -> usize {
        lock(&self.listeners).entries.len()
    }

    fn notify(&self) {
        // Copy out so listeners may subscribe or unsubscribe while running.
        let listeners: Vec<Listener> = lock(&self.listeners)
            .entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        debug!(listeners = listeners.len(), "inventory changed");
        for listener in listeners {
            listener();
        }
    }
}

impl std::fmt::Debug for InventoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InventoryStore")
            .field("inventory", &*lock(&self.inventory))
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Handle for a registered change listener
///
/// Dropping the handle removes the listener.
#[must_use = "dropping a Subscription immediately unsubscribes the listener"]
pub struct Subscription {
    id: u64,
    listeners: Weak<Mutex<ListenerList>>,
}

impl Subscription {
    /// Removes the listener now
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            lock(&listeners).entries.retain(|(id, _)| *id != self.id);
            debug!(id = self.id, "listener unsubscribed");
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
