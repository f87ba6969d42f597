//! Save/load tests against a temporary directory

use std::fs;

use slotstack::save::{CURRENT_SAVE_VERSION, SaveFile, SavedSlot};
use slotstack::{InventoryStore, ItemCatalog, SaveError, SaveManager};

fn stocked_store(catalog: &ItemCatalog) -> InventoryStore {
    let store = InventoryStore::new(4);
    store.add_item(&catalog.get("stone").unwrap(), 13).unwrap();
    store.add_item(&catalog.get("pickaxe").unwrap(), 1).unwrap();
    store
}

#[test]
fn save_and_load_preserves_slot_order() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = ItemCatalog::create_default();
    let store = stocked_store(&catalog);
    let manager = SaveManager::new(dir.path().join("saves")).unwrap();

    let path = manager.save(&store, "slot_1").unwrap();
    assert!(path.exists());
    assert!(manager.exists("slot_1"));

    let loaded = manager.load("slot_1", &catalog).unwrap();
    let original = store.with_inventory(|inventory| inventory.clone());
    assert_eq!(loaded, original);
    assert_eq!(loaded.capacity(), 4);
}

#[test]
fn load_missing_and_bad_names() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = ItemCatalog::create_default();
    let manager = SaveManager::new(dir.path()).unwrap();

    assert!(matches!(
        manager.load("nothing_here", &catalog),
        Err(SaveError::NotFound(_))
    ));
    assert!(matches!(
        manager.load("../escape", &catalog),
        Err(SaveError::InvalidName(_))
    ));
    assert!(!manager.exists(""));
}

#[test]
fn load_rejects_unknown_item() {
    let dir = tempfile::tempdir().unwrap();
    let manager = SaveManager::new(dir.path()).unwrap();
    let catalog = ItemCatalog::create_default();

    let save = SaveFile {
        version: CURRENT_SAVE_VERSION,
        saved_at: chrono::Utc::now(),
        capacity: 4,
        slots: vec![SavedSlot {
            item_id: "mithril".to_string(),
            quantity: 1,
        }],
    };
    manager.save_file(&save, "odd").unwrap();

    assert!(matches!(
        manager.load("odd", &catalog),
        Err(SaveError::UnknownItem(id)) if id == "mithril"
    ));
}

#[test]
fn load_rejects_overfull_stack() {
    let dir = tempfile::tempdir().unwrap();
    let manager = SaveManager::new(dir.path()).unwrap();
    let catalog = ItemCatalog::create_default();

    let save = SaveFile {
        version: CURRENT_SAVE_VERSION,
        saved_at: chrono::Utc::now(),
        capacity: 4,
        slots: vec![SavedSlot {
            item_id: "stone".to_string(),
            quantity: 99,
        }],
    };
    manager.save_file(&save, "cheated").unwrap();

    assert!(matches!(
        manager.load("cheated", &catalog),
        Err(SaveError::Corrupted(_))
    ));
}

#[test]
fn load_rejects_newer_version_and_garbage() {
    let dir = tempfile::tempdir().unwrap();
    let manager = SaveManager::new(dir.path()).unwrap();
    let catalog = ItemCatalog::create_default();

    let mut save = SaveFile::capture(&slotstack::Inventory::new(4));
    save.version = CURRENT_SAVE_VERSION + 1;
    manager.save_file(&save, "future").unwrap();
    assert!(matches!(
        manager.load("future", &catalog),
        Err(SaveError::InvalidVersion(_))
    ));

    fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
    assert!(matches!(
        manager.load("broken", &catalog),
        Err(SaveError::Serialization(_))
    ));
}

#[test]
fn list_saves_skips_unreadable_files() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = ItemCatalog::create_default();
    let manager = SaveManager::new(dir.path()).unwrap();
    let store = stocked_store(&catalog);

    manager.save(&store, "first").unwrap();
    manager.save(&InventoryStore::new(4), "second").unwrap();
    fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
    fs::write(dir.path().join("notes.txt"), "hello").unwrap();

    let saves = manager.list_saves().unwrap();
    let mut names: Vec<&str> = saves.iter().map(|s| s.name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["first", "second"]);

    let first = saves.iter().find(|s| s.name == "first").unwrap();
    assert_eq!(first.slot_count, 3);
}

fn write_raw(dir: &std::path::Path, name: &str, capacity: &str) {
    let json = format!(
        r#"{{ "version": 1, "saved_at": "2026-01-01T00:00:00Z", "capacity": {capacity}, "slots": [] }}"#
    );
    fs::write(dir.join(format!("{name}.json")), json).unwrap();
}

#[test]
fn load_rejects_zero_and_oversized_capacity() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = ItemCatalog::create_default();
    let manager = SaveManager::new(dir.path()).unwrap().with_max_slots(4);

    write_raw(dir.path(), "empty_bag", "0");
    write_raw(dir.path(), "bottomless", "18446744073709551615");
    write_raw(dir.path(), "big", "1000000000000");

    for name in ["empty_bag", "bottomless", "big"] {
        assert!(
            matches!(manager.load(name, &catalog), Err(SaveError::Corrupted(_))),
            "{name} should be rejected"
        );
    }
}

#[test]
fn load_huge_capacity_without_limit_does_not_allocate() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = ItemCatalog::create_default();
    let manager = SaveManager::new(dir.path()).unwrap();

    write_raw(dir.path(), "bottomless", "18446744073709551615");

    let inventory = manager.load("bottomless", &catalog).unwrap();
    assert_eq!(inventory.capacity(), usize::MAX);
    assert!(inventory.is_empty());
}
