//! Save manager for inventory persistence
//!
//! This module provides the SaveManager struct which handles:
//! - Writing inventory contents to named JSON files
//! - Loading and validating them against the item catalog
//! - Listing existing saves

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::*;
use crate::inventory::{Inventory, InventoryError, InventoryStore};
use crate::item::ItemCatalog;

#[derive(Debug, Clone)]
pub struct SaveManager {
    save_directory: PathBuf,
    max_slots: Option<usize>,
}

impl SaveManager {
    /// Creates a new SaveManager with the given save directory
    ///
    /// The save directory will be created if it doesn't exist.
    pub fn new(save_directory: impl AsRef<Path>) -> Result<Self, SaveError> {
        let save_dir = save_directory.as_ref().to_path_buf();

        if !save_dir.exists() {
            fs::create_dir_all(&save_dir)?;
        }

        Ok(SaveManager {
            save_directory: save_dir,
            max_slots: None,
        })
    }

    /// Rejects loaded saves whose capacity is larger than `max_slots`
    pub fn with_max_slots(mut self, max_slots: usize) -> Self {
        self.max_slots = Some(max_slots);
        self
    }

    /// Platform data directory for saves, e.g. `~/.local/share/slotstack/saves`
    pub fn default_directory() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("slotstack").join("saves"))
    }

    pub fn directory(&self) -> &Path {
        &self.save_directory
    }

    /// Saves the store's current contents under `name`
    pub fn save(&self, store: &InventoryStore, name: &str) -> Result<PathBuf, SaveError> {
        let save_file = store.with_inventory(SaveFile::capture);
        self.save_file(&save_file, name)
    }

    /// Writes a prepared save file under `name`
    pub fn save_file(&self, save_file: &SaveFile, name: &str) -> Result<PathBuf, SaveError> {
        let filepath = self.path_for(name)?;

        // Pretty format for readability/debugging
        let json = serde_json::to_string_pretty(save_file)?;
        fs::write(&filepath, json)?;

        info!(path = %filepath.display(), slots = save_file.slots.len(), "inventory saved");
        Ok(filepath)
    }

    /// Reads the raw save file for `name`
    pub fn load_file(&self, name: &str) -> Result<SaveFile, SaveError> {
        let filepath = self.path_for(name)?;

        if !filepath.exists() {
            return Err(SaveError::NotFound(name.to_string()));
        }

        let json = fs::read_to_string(&filepath)?;
        let save_file: SaveFile = serde_json::from_str(&json)?;

        if save_file.version > CURRENT_SAVE_VERSION {
            return Err(SaveError::InvalidVersion(save_file.version));
        }

        Ok(save_file)
    }

    /// Loads `name` and rebuilds the inventory through `catalog`
    pub fn load(&self, name: &str, catalog: &ItemCatalog) -> Result<Inventory, SaveError> {
        let save_file = self.load_file(name)?;

        if let Some(max_slots) = self.max_slots {
            if save_file.capacity > max_slots {
                return Err(SaveError::Corrupted(InventoryError::InvalidArgument(format!(
                    "capacity {} exceeds the configured {max_slots} slots",
                    save_file.capacity
                ))));
            }
        }

        let slots = save_file
            .slots
            .iter()
            .map(|slot| {
                catalog
                    .get(&slot.item_id)
                    .map(|item| (item, slot.quantity))
                    .ok_or_else(|| SaveError::UnknownItem(slot.item_id.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let inventory = Inventory::restore(save_file.capacity, slots)?;
        debug!(name, slots = inventory.len(), "inventory loaded");
        Ok(inventory)
    }

    /// Check if a save exists under `name`
    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).is_ok_and(|path| path.exists())
    }

    /// List all readable saves, newest first
    pub fn list_saves(&self) -> Result<Vec<SaveFileInfo>, SaveError> {
        let mut saves = Vec::new();

        for entry in fs::read_dir(&self.save_directory)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            if let Ok(save_file) = self.load_file(name) {
                saves.push(SaveFileInfo {
                    name: name.to_string(),
                    saved_at: save_file.saved_at,
                    slot_count: save_file.slots.len(),
                });
            }
        }

        saves.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        Ok(saves)
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, SaveError> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(SaveError::InvalidName(name.to_string()));
        }
        Ok(self.save_directory.join(format!("{name}.json")))
    }
}
