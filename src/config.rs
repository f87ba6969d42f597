//! Runtime configuration
//!
//! Loaded from a JSON file; every field is optional and falls back to the
//! defaults below.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::interaction::DEFAULT_MINING_DAMAGE;
use crate::inventory::DEFAULT_CAPACITY;
use crate::item::{CatalogError, ItemCatalog};
use crate::save::SaveManager;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Number of inventory slots (and display cells)
    pub max_slots: usize,

    /// Hit points removed per mining hit
    pub mining_damage: f32,

    /// Item catalog file; the built-in catalog is used when unset
    pub catalog_path: Option<PathBuf>,

    /// Where saves go; the platform data directory when unset
    pub save_directory: Option<PathBuf>,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        InventoryConfig {
            max_slots: DEFAULT_CAPACITY,
            mining_damage: DEFAULT_MINING_DAMAGE,
            catalog_path: None,
            save_directory: None,
        }
    }
}

impl InventoryConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: InventoryConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&json)?;
        debug!(path = %path.as_ref().display(), ?config, "loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_slots == 0 {
            return Err(ConfigError::Invalid("max_slots must be at least 1".to_string()));
        }
        if !(self.mining_damage.is_finite() && self.mining_damage > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "mining_damage must be positive, got {}",
                self.mining_damage
            )));
        }
        Ok(())
    }

    /// Loads the configured catalog, or the built-in one
    pub fn load_catalog(&self) -> Result<ItemCatalog, CatalogError> {
        match &self.catalog_path {
            Some(path) => ItemCatalog::load_from_file(path),
            None => Ok(ItemCatalog::create_default()),
        }
    }

    /// Configured save directory, or the platform default
    pub fn save_directory(&self) -> Option<PathBuf> {
        self.save_directory
            .clone()
            .or_else(SaveManager::default_directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = InventoryConfig::from_json_str("{}").unwrap();
        assert_eq!(config, InventoryConfig::default());
        assert_eq!(config.max_slots, 4);
        assert_eq!(config.mining_damage, 25.0);
    }

    #[test]
    fn test_partial_json() {
        let config =
            InventoryConfig::from_json_str(r#"{ "max_slots": 9, "save_directory": "/tmp/s" }"#)
                .unwrap();
        assert_eq!(config.max_slots, 9);
        assert_eq!(config.save_directory(), Some(PathBuf::from("/tmp/s")));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            InventoryConfig::from_json_str(r#"{ "max_slots": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            InventoryConfig::from_json_str(r#"{ "mining_damage": -1.0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            InventoryConfig::from_json_str(r#""four slots""#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_missing_catalog_file() {
        let config = InventoryConfig {
            catalog_path: Some(PathBuf::from("/nonexistent/catalog.json")),
            ..InventoryConfig::default()
        };
        assert!(matches!(config.load_catalog(), Err(CatalogError::Io(_))));
    }

    #[test]
    fn test_config_file_selects_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let catalog_path = dir.path().join("catalog.json");
        fs::write(
            &catalog_path,
            r#"{ "items": [{ "id": "berry", "name": "Berry", "is_stackable": true }] }"#,
        )
        .unwrap();

        let config_path = dir.path().join("slotstack.json");
        let config_json = serde_json::json!({ "max_slots": 6, "catalog_path": catalog_path });
        fs::write(&config_path, config_json.to_string()).unwrap();

        let config = InventoryConfig::load_from_file(&config_path).unwrap();
        assert_eq!(config.max_slots, 6);
        let catalog = config.load_catalog().unwrap();
        assert!(catalog.get("berry").is_some());
        assert!(catalog.get("stone").is_none());
    }
}
