//! Integration tests for recipe persistence.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use melange::{FileStore, KeyValueStore, MelangeError, Recipe, RecipeStore, Result};

// =============================================================================
// File-Backed Persistence
// =============================================================================

#[test]
fn test_recipes_survive_reopen() {
    let dir = TempDir::new().expect("temp dir");
    let backend = FileStore::new(dir.path());

    let stored = {
        let mut store = RecipeStore::open(Box::new(backend.clone())).unwrap();
        store
            .save(Recipe::new("persisted").with_description("kept across restarts"))
            .unwrap()
    };

    let reopened = RecipeStore::open(Box::new(backend)).unwrap();
    let loaded = reopened.get(&stored.id).expect("recipe after reopen");

    assert_eq!(loaded.name, "persisted");
    assert_eq!(loaded.description, "kept across restarts");
    // Timestamps round-trip through their ISO representation.
    assert_eq!(loaded.created, stored.created);
}

#[test]
fn test_delete_survives_reopen() {
    let dir = TempDir::new().expect("temp dir");
    let backend = FileStore::new(dir.path());

    let mut store = RecipeStore::open(Box::new(backend.clone())).unwrap();
    let keep = store.save(Recipe::new("keep")).unwrap();
    let gone = store.save(Recipe::new("gone")).unwrap();

    assert!(store.delete(&gone.id).unwrap());
    assert!(!store.delete(&gone.id).unwrap());

    let reopened = RecipeStore::open(Box::new(backend)).unwrap();
    assert_eq!(reopened.len(), 1);
    assert!(reopened.get(&keep.id).is_some());
    assert!(reopened.get(&gone.id).is_none());
}

#[test]
fn test_touch_last_used_survives_reopen() {
    let dir = TempDir::new().expect("temp dir");
    let backend = FileStore::new(dir.path());

    let mut store = RecipeStore::open(Box::new(backend.clone())).unwrap();
    let stored = store.save(Recipe::new("used")).unwrap();
    store.touch_last_used(&stored.id).unwrap();

    let reopened = RecipeStore::open(Box::new(backend)).unwrap();
    assert!(reopened.get(&stored.id).unwrap().last_used.is_some());
}

#[test]
fn test_save_requires_name_and_leaves_list_unchanged() {
    let dir = TempDir::new().expect("temp dir");
    let mut store = RecipeStore::open(Box::new(FileStore::new(dir.path()))).unwrap();

    store.save(Recipe::new("real")).unwrap();
    let err = store.save(Recipe::new("  \t")).unwrap_err();

    assert!(matches!(err, MelangeError::InvalidRecipe(_)));
    assert_eq!(store.len(), 1);
}

// =============================================================================
// Rollback On Persistence Failure
// =============================================================================

/// Backend that can be switched to fail every write. Handles share
/// state, so a test can keep one while the store owns another.
#[derive(Clone, Default)]
struct FlakyStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
    failing: Arc<AtomicBool>,
}

impl FlakyStore {
    fn fail_writes(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(MelangeError::Persistence("disk full".to_string()));
        }
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[test]
fn test_failed_save_rolls_back() {
    let backend = FlakyStore::default();
    let mut store = RecipeStore::open(Box::new(backend.clone())).unwrap();
    store.save(Recipe::new("before")).unwrap();

    backend.fail_writes();
    assert!(store.save(Recipe::new("after")).is_err());
    assert_eq!(store.len(), 1, "failed save must not appear in list()");
}

#[test]
fn test_failed_delete_rolls_back() {
    let backend = FlakyStore::default();
    let mut store = RecipeStore::open(Box::new(backend.clone())).unwrap();
    let stored = store.save(Recipe::new("sticky")).unwrap();

    backend.fail_writes();
    assert!(store.delete(&stored.id).is_err());
    assert!(store.get(&stored.id).is_some());
}

#[test]
fn test_failed_touch_rolls_back() {
    let backend = FlakyStore::default();
    let mut store = RecipeStore::open(Box::new(backend.clone())).unwrap();
    let stored = store.save(Recipe::new("stale")).unwrap();

    backend.fail_writes();
    assert!(store.touch_last_used(&stored.id).is_err());
    assert!(store.get(&stored.id).unwrap().last_used.is_none());
}
