// Item catalog module
//
// This module provides the item side of the inventory, including:
// - Item and resource definitions (loaded from JSON)
// - Identity-compared item handles
// - Slot records held by inventories
// - The catalog that resolves IDs to handles

pub mod definition;
pub mod error;
pub mod registry;
pub mod stack;

// Re-export main types for convenient access
pub use definition::{Item, ItemDefinition, Resource, ResourceDefinition};
pub use error::CatalogError;
pub use registry::{CatalogFile, ItemCatalog};
pub use stack::Slot;
