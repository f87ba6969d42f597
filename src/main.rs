use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use slotstack::display::{self, SlotDisplay};
use slotstack::interaction::{MineOutcome, PickableItem, ResourceNode};
use slotstack::{InventoryConfig, InventoryStore, ItemCatalog, SaveManager};

/// Walks through a short play session: pick up a tool, mine a few
/// resources, spend some of them, then print and save the inventory.
///
/// Usage: `slotstack [config.json]`. The config's `catalog_path` picks the
/// item catalog; without a config the built-in catalog and defaults are used.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => InventoryConfig::load_from_file(&path)
            .with_context(|| format!("loading config from {path}"))?,
        None => InventoryConfig::default(),
    };
    let catalog = config.load_catalog().context("loading item catalog")?;

    let store = Arc::new(InventoryStore::new(config.max_slots));
    let slot_display = Arc::new(Mutex::new(SlotDisplay::new(config.max_slots)));
    let _binding = display::bind(&store, Arc::clone(&slot_display));

    if let Some(item) = catalog.get("pickaxe") {
        PickableItem::new(item).pickup(&store);
    }

    for resource_id in ["rock", "tree", "rock", "crystal_vein"] {
        let Some(resource) = catalog.resource(resource_id) else {
            warn!(resource = resource_id, "resource not in catalog");
            continue;
        };
        mine_out(ResourceNode::new(resource.clone()), config.mining_damage, &store);
    }

    if let Some(stone) = catalog.get("stone") {
        if let Err(err) = store.remove_item(&stone, 4) {
            warn!(%err, "could not spend stone");
        }
    }

    print_display(&slot_display.lock().unwrap_or_else(PoisonError::into_inner));

    save_session(&config, &store, &catalog)
}

fn mine_out(mut node: ResourceNode, damage: f32, store: &InventoryStore) {
    loop {
        match node.mine(damage, store) {
            MineOutcome::Damaged { .. } => continue,
            MineOutcome::Collected(_) | MineOutcome::AlreadyCollected => break,
        }
    }
}

fn print_display(display: &SlotDisplay) {
    for (index, cell) in display.cells().iter().enumerate() {
        match cell {
            Some(cell) => println!("[{index}] {} x{}", cell.name, cell.quantity),
            None => println!("[{index}] -"),
        }
    }
}

fn save_session(config: &InventoryConfig, store: &InventoryStore, catalog: &ItemCatalog) -> Result<()> {
    let Some(directory) = config.save_directory() else {
        warn!("no save directory available, skipping save");
        return Ok(());
    };

    let manager = SaveManager::new(&directory)
        .with_context(|| format!("opening save directory {}", directory.display()))?
        .with_max_slots(config.max_slots);
    let path = manager.save(store, "session")?;

    let reloaded = manager.load("session", catalog)?;
    info!(path = %path.display(), slots = reloaded.len(), "session saved");
    Ok(())
}
