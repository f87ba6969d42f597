use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::definition::{Item, ItemDefinition, Resource, ResourceDefinition};
use super::error::CatalogError;

/// On-disk layout of a catalog file
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub items: Vec<ItemDefinition>,

    #[serde(default)]
    pub resources: Vec<ResourceDefinition>,
}

/// Central registry of all item and resource definitions
///
/// This is the single source of truth for what items exist. Inventories hold
/// [`Item`] handles handed out by the catalog; saves refer to items by ID and
/// are resolved back through it.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: HashMap<String, Item>,
    resources: HashMap<String, Resource>,
}

impl ItemCatalog {
    /// Creates a new empty catalog
    pub fn new() -> Self {
        ItemCatalog {
            items: HashMap::new(),
            resources: HashMap::new(),
        }
    }

    /// Creates a catalog with the built-in items pre-registered
    pub fn create_default() -> Self {
        let mut catalog = Self::new();

        if let Err(err) = catalog.register_base_items() {
            error!(%err, "failed to register built-in items");
        }

        catalog
    }

    /// Parses a catalog from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::from_file_data(file)
    }

    /// Loads a catalog from a JSON file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_json_str(&json)?;
        debug!(
            path = %path.as_ref().display(),
            items = catalog.items.len(),
            resources = catalog.resources.len(),
            "loaded item catalog"
        );
        Ok(catalog)
    }

    /// Builds a catalog from parsed file data
    ///
    /// Items are registered before resources so resources may refer to any
    /// item in the file.
    pub fn from_file_data(file: CatalogFile) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for item in file.items {
            catalog.register(item)?;
        }
        for resource in file.resources {
            catalog.register_resource(resource)?;
        }
        Ok(catalog)
    }

    /// Registers a new item definition
    ///
    /// Returns the handle for the new item, or an error if an item with this
    /// ID already exists.
    pub fn register(&mut self, definition: ItemDefinition) -> Result<Item, CatalogError> {
        if self.items.contains_key(&definition.id) {
            return Err(CatalogError::DuplicateItem(definition.id));
        }

        let item = Item::new(definition);
        self.items.insert(item.id().to_string(), item.clone());
        Ok(item)
    }

    /// Registers a resource, resolving the item it yields
    pub fn register_resource(
        &mut self,
        definition: ResourceDefinition,
    ) -> Result<&Resource, CatalogError> {
        if self.resources.contains_key(&definition.id) {
            return Err(CatalogError::DuplicateResource(definition.id));
        }
        if definition.quantity == 0 {
            return Err(CatalogError::InvalidResource {
                resource: definition.id,
                reason: "quantity must be at least 1".to_string(),
            });
        }
        if !(definition.hp.is_finite() && definition.hp > 0.0) {
            return Err(CatalogError::InvalidResource {
                reason: format!("hp must be positive, got {}", definition.hp),
                resource: definition.id,
            });
        }

        let item = self
            .get(&definition.item_id)
            .ok_or_else(|| CatalogError::UnknownItem {
                resource: definition.id.clone(),
                item_id: definition.item_id.clone(),
            })?;

        let id = definition.id.clone();
        let resource = Resource {
            id: definition.id,
            name: definition.name,
            item,
            quantity: definition.quantity,
            hp: definition.hp,
        };
        Ok(&*self.resources.entry(id).or_insert(resource))
    }

    /// Gets an item handle by ID
    pub fn get(&self, id: &str) -> Option<Item> {
        self.items.get(id).cloned()
    }

    /// Gets a resource by ID
    pub fn resource(&self, id: &str) -> Option<&Resource> {
        self.resources.get(id)
    }

    /// Returns true if an item with this ID exists
    pub fn exists(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Returns all registered item IDs, sorted
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.items.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Returns all registered resource IDs, sorted
    pub fn resource_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.resources.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // ======================================================================
    // Built-in items
    // ======================================================================

    fn register_base_items(&mut self) -> Result<(), CatalogError> {
        self.register(ItemDefinition::stackable("stone", "Stone", 10).with_icon("icons/stone.png"))?;
        self.register(ItemDefinition::stackable("wood", "Wood", 20).with_icon("icons/wood.png"))?;
        self.register(
            ItemDefinition::stackable("crystal", "Crystal", 5).with_icon("icons/crystal.png"),
        )?;
        self.register(
            ItemDefinition::single("pickaxe", "Pickaxe")
                .with_icon("icons/pickaxe.png")
                .with_prefab("prefabs/pickaxe"),
        )?;

        self.register_resource(ResourceDefinition::new("rock", "Rock", "stone", 3, 100.0))?;
        self.register_resource(ResourceDefinition::new("tree", "Tree", "wood", 4, 75.0))?;
        self.register_resource(ResourceDefinition::new(
            "crystal_vein",
            "Crystal Vein",
            "crystal",
            2,
            150.0,
        ))?;

        Ok(())
    }
}
