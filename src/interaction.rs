//! Collection triggers
//!
//! World objects that put items into an inventory: resource nodes that are
//! mined down to zero hit points, and loose items that are picked up. Both
//! are handed the [`InventoryStore`] they deliver into. How the player aims
//! at them (raycasts, input) is the caller's business.

use tracing::{debug, info, warn};

use crate::inventory::{InventoryError, InventoryStore};
use crate::item::{Item, Resource};

/// Hit points removed by one mining hit
pub const DEFAULT_MINING_DAMAGE: f32 = 25.0;

/// Result of hitting a [`ResourceNode`]
#[derive(Debug, Clone, PartialEq)]
pub enum MineOutcome {
    /// The node was already depleted; nothing happened
    AlreadyCollected,

    /// The node took damage but still stands
    Damaged { remaining_hp: f32, fraction: f32 },

    /// The node was depleted and its yield delivered to the inventory
    Collected(Result<(), InventoryError>),
}

/// A mineable resource placed in the world
#[derive(Debug, Clone)]
pub struct ResourceNode {
    resource: Resource,
    current_hp: f32,
    collected: bool,
}

impl ResourceNode {
    pub fn new(resource: Resource) -> Self {
        ResourceNode {
            current_hp: resource.hp,
            resource,
            collected: false,
        }
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    pub fn current_hp(&self) -> f32 {
        self.current_hp.max(0.0)
    }

    /// Remaining hit points as a fraction of the maximum, for HP bars
    pub fn hp_fraction(&self) -> f32 {
        if !(self.resource.hp > 0.0) || self.collected {
            return 0.0;
        }
        (self.current_hp / self.resource.hp).clamp(0.0, 1.0)
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Applies one hit
    ///
    /// When hit points reach zero the node is marked collected and its item
    /// is added to `store`. The node is consumed even if the inventory could
    /// not take everything. Damage that is not a positive finite number is
    /// ignored.
    pub fn mine(&mut self, damage: f32, store: &InventoryStore) -> MineOutcome {
        if self.collected {
            return MineOutcome::AlreadyCollected;
        }

        if damage.is_finite() && damage > 0.0 {
            self.current_hp -= damage;
        } else {
            warn!(resource = %self.resource.id, damage, "ignoring invalid mining damage");
        }
        debug!(
            resource = %self.resource.id,
            hp = self.current_hp(),
            max_hp = self.resource.hp,
            "resource hit"
        );

        if self.current_hp > 0.0 {
            return MineOutcome::Damaged {
                remaining_hp: self.current_hp,
                fraction: self.hp_fraction(),
            };
        }

        self.collected = true;
        info!(resource = %self.resource.id, "resource depleted, collecting");

        let result = store.add_item(&self.resource.item, self.resource.quantity);
        if let Err(err) = &result {
            warn!(resource = %self.resource.id, %err, "inventory full or could not add item");
        }
        MineOutcome::Collected(result)
    }
}

/// Result of [`PickableItem::pickup`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickupOutcome {
    AlreadyPickedUp,
    PickedUp(Result<(), InventoryError>),
}

/// A single loose item lying in the world
#[derive(Debug, Clone)]
pub struct PickableItem {
    item: Item,
    picked_up: bool,
}

impl PickableItem {
    pub fn new(item: Item) -> Self {
        PickableItem {
            item,
            picked_up: false,
        }
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    pub fn is_picked_up(&self) -> bool {
        self.picked_up
    }

    /// Adds one unit to `store`
    ///
    /// The world object is gone afterwards whether or not the add succeeded.
    pub fn pickup(&mut self, store: &InventoryStore) -> PickupOutcome {
        if self.picked_up {
            return PickupOutcome::AlreadyPickedUp;
        }
        self.picked_up = true;

        let result = store.add_item(&self.item, 1);
        match &result {
            Ok(()) => info!(item = self.item.id(), "picked up item"),
            Err(err) => warn!(item = self.item.id(), %err, "inventory full or could not add item"),
        }
        PickupOutcome::PickedUp(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemCatalog;

    #[test]
    fn test_mining_until_depleted() {
        let catalog = ItemCatalog::create_default();
        let store = InventoryStore::new(4);
        let mut rock = ResourceNode::new(catalog.resource("rock").unwrap().clone());

        for expected in [75.0, 50.0, 25.0] {
            match rock.mine(DEFAULT_MINING_DAMAGE, &store) {
                MineOutcome::Damaged { remaining_hp, .. } => assert_eq!(remaining_hp, expected),
                other => panic!("unexpected outcome {other:?}"),
            }
        }
        assert_eq!(rock.hp_fraction(), 0.25);
        assert!(store.is_empty());

        assert_eq!(rock.mine(DEFAULT_MINING_DAMAGE, &store), MineOutcome::Collected(Ok(())));
        assert!(rock.is_collected());
        assert_eq!(rock.current_hp(), 0.0);
        assert_eq!(store.count_item(&catalog.get("stone").unwrap()), 3);

        assert_eq!(rock.mine(DEFAULT_MINING_DAMAGE, &store), MineOutcome::AlreadyCollected);
        assert_eq!(store.count_item(&catalog.get("stone").unwrap()), 3);
    }

    #[test]
    fn test_invalid_damage_is_ignored() {
        let catalog = ItemCatalog::create_default();
        let store = InventoryStore::new(4);
        let mut rock = ResourceNode::new(catalog.resource("rock").unwrap().clone());

        for damage in [-50.0, 0.0, f32::NAN, f32::INFINITY] {
            assert_eq!(
                rock.mine(damage, &store),
                MineOutcome::Damaged { remaining_hp: 100.0, fraction: 1.0 }
            );
        }
        assert_eq!(rock.current_hp(), 100.0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_zero_hp_resource_fraction() {
        let catalog = ItemCatalog::create_default();
        let mut resource = catalog.resource("rock").unwrap().clone();
        resource.hp = 0.0;
        let store = InventoryStore::new(4);
        let mut rock = ResourceNode::new(resource);

        assert_eq!(rock.hp_fraction(), 0.0);
        assert!(matches!(rock.mine(1.0, &store), MineOutcome::Collected(Ok(()))));
        assert_eq!(rock.hp_fraction(), 0.0);
    }

    #[test]
    fn test_mining_into_full_inventory() {
        let catalog = ItemCatalog::create_default();
        let pickaxe = catalog.get("pickaxe").unwrap();
        let store = InventoryStore::new(2);
        store.add_item(&pickaxe, 2).unwrap();

        let mut tree = ResourceNode::new(catalog.resource("tree").unwrap().clone());
        let outcome = tree.mine(1000.0, &store);

        assert_eq!(
            outcome,
            MineOutcome::Collected(Err(InventoryError::CapacityExceeded {
                requested: 4,
                placed: 0
            }))
        );
        assert!(tree.is_collected());
    }

    #[test]
    fn test_pickup_once() {
        let catalog = ItemCatalog::create_default();
        let store = InventoryStore::new(4);
        let mut pickaxe = PickableItem::new(catalog.get("pickaxe").unwrap());

        assert_eq!(pickaxe.pickup(&store), PickupOutcome::PickedUp(Ok(())));
        assert_eq!(pickaxe.pickup(&store), PickupOutcome::AlreadyPickedUp);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_pickup_consumed_even_when_full() {
        let catalog = ItemCatalog::create_default();
        let store = InventoryStore::new(1);
        store.add_item(&catalog.get("pickaxe").unwrap(), 1).unwrap();

        let mut crystal = PickableItem::new(catalog.get("crystal").unwrap());
        assert!(matches!(
            crystal.pickup(&store),
            PickupOutcome::PickedUp(Err(InventoryError::CapacityExceeded { .. }))
        ));
        assert!(crystal.is_picked_up());
    }
}
