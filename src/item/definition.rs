use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

fn default_max_stack() -> u32 {
    1
}

fn default_resource_quantity() -> u32 {
    1
}

fn default_resource_hp() -> f32 {
    100.0
}

/// The blueprint for an item type
///
/// This is the catalog entry as it appears in data files. Inventories never
/// hold it directly; they hold an [`Item`] handle created from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Catalog key (used for lookups and saves)
    pub id: String,

    /// Display name shown in UI
    pub name: String,

    /// Can multiple units share one slot?
    #[serde(default)]
    pub is_stackable: bool,

    /// Units per slot. Ignored (forced to 1) when not stackable.
    #[serde(default = "default_max_stack")]
    pub max_stack: u32,

    /// Icon asset reference, opaque to the inventory
    #[serde(default)]
    pub icon: Option<String>,

    /// Spawnable world object reference, opaque to the inventory
    #[serde(default)]
    pub prefab: Option<String>,
}

impl ItemDefinition {
    /// Creates a non-stackable item definition
    pub fn single(id: impl Into<String>, name: impl Into<String>) -> Self {
        ItemDefinition {
            id: id.into(),
            name: name.into(),
            is_stackable: false,
            max_stack: 1,
            icon: None,
            prefab: None,
        }
    }

    /// Creates a stackable item definition
    pub fn stackable(id: impl Into<String>, name: impl Into<String>, max_stack: u32) -> Self {
        ItemDefinition {
            is_stackable: true,
            max_stack,
            ..Self::single(id, name)
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_prefab(mut self, prefab: impl Into<String>) -> Self {
        self.prefab = Some(prefab.into());
        self
    }

    /// Returns a copy with the stacking fields forced into range
    ///
    /// Non-stackable items always have `max_stack == 1`, and a stackable item
    /// never has a zero stack size.
    pub fn normalized(mut self) -> Self {
        if !self.is_stackable || self.max_stack < 1 {
            self.max_stack = 1;
        }
        self
    }
}

/// Shared handle to an item definition
///
/// Two handles are equal only if they were created from the same
/// registration. Definitions with identical fields registered twice are
/// different items.
#[derive(Clone)]
pub struct Item(Arc<ItemDefinition>);

impl Item {
    /// Wraps a definition in a new item identity
    pub fn new(definition: ItemDefinition) -> Self {
        Item(Arc::new(definition.normalized()))
    }

    pub fn definition(&self) -> &ItemDefinition {
        &self.0
    }

    pub fn id(&self) -> &str {
        &self.0.id
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn is_stackable(&self) -> bool {
        self.0.is_stackable
    }

    /// Capacity of a single slot for this item (always >= 1)
    pub fn max_stack(&self) -> u32 {
        self.0.max_stack
    }

    pub fn icon(&self) -> Option<&str> {
        self.0.icon.as_deref()
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.0), state);
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("id", &self.0.id)
            .field("max_stack", &self.0.max_stack)
            .finish()
    }
}

/// A mineable world resource as it appears in data files
///
/// When a node of this resource is depleted it yields `quantity` units of the
/// item named by `item_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDefinition {
    pub id: String,

    pub name: String,

    /// Catalog id of the item this resource yields
    pub item_id: String,

    #[serde(default = "default_resource_quantity")]
    pub quantity: u32,

    /// Hit points before the node is depleted
    #[serde(default = "default_resource_hp")]
    pub hp: f32,

    #[serde(default)]
    pub prefab: Option<String>,
}

impl ResourceDefinition {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        item_id: impl Into<String>,
        quantity: u32,
        hp: f32,
    ) -> Self {
        ResourceDefinition {
            id: id.into(),
            name: name.into(),
            item_id: item_id.into(),
            quantity,
            hp,
            prefab: None,
        }
    }
}

/// A resource definition with its yielded item resolved
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub id: String,
    pub name: String,
    pub item: Item,
    pub quantity: u32,
    pub hp: f32,
}
