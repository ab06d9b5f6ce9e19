//! Recipe storage over an injected key-value backend.
//!
//! The backend is deliberately tiny (`get`/`set` of strings) so hosts can
//! supply whatever durable storage they have; the store owns the recipe
//! collection and persists it as one JSON document under a fixed key.
//! Every mutation persists before it commits to memory, so a failed
//! write leaves the in-memory state consistent with what is on disk.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Utc;

use super::model::{generate_recipe_id, Recipe};
use crate::error::{MelangeError, Result};

/// Fixed key the recipe collection is persisted under.
pub const RECIPES_KEY: &str = "melange.recipes";

/// Synchronous key-value persistence used by the recipe store.
///
/// Implementations must be durable by the time `set` returns.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// In-memory backend for tests and short-lived embedders.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| MelangeError::Persistence("store lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| MelangeError::Persistence("store lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed backend: one JSON document per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a backend rooted at the given directory. The directory is
    /// created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path).map(Some).map_err(|e| {
            MelangeError::Persistence(format!("failed to read '{}': {}", path.display(), e))
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|e| {
                MelangeError::Persistence(format!(
                    "failed to create directory '{}': {}",
                    self.dir.display(),
                    e
                ))
            })?;
        }

        let path = self.key_path(key);
        fs::write(&path, value).map_err(|e| {
            MelangeError::Persistence(format!("failed to write '{}': {}", path.display(), e))
        })
    }
}

/// Owns the recipe collection and its persisted representation.
pub struct RecipeStore {
    backend: Box<dyn KeyValueStore>,
    recipes: Vec<Recipe>,
}

impl RecipeStore {
    /// Open a store, loading any previously persisted collection.
    pub fn open(backend: Box<dyn KeyValueStore>) -> Result<Self> {
        let recipes = match backend.get(RECIPES_KEY)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                MelangeError::Persistence(format!("failed to parse recipe collection: {e}"))
            })?,
            None => Vec::new(),
        };
        Ok(Self { backend, recipes })
    }

    /// Save a recipe. Assigns a fresh id and creation timestamp; the
    /// caller's id and usage timestamp are discarded. Returns the stored
    /// snapshot.
    pub fn save(&mut self, mut recipe: Recipe) -> Result<Recipe> {
        recipe.validate()?;
        recipe.id = generate_recipe_id();
        recipe.created = Utc::now();
        recipe.last_used = None;

        let mut next = self.recipes.clone();
        next.push(recipe.clone());
        self.persist(&next)?;
        self.recipes = next;
        Ok(recipe)
    }

    /// All stored recipes, as value snapshots.
    pub fn list(&self) -> Vec<Recipe> {
        self.recipes.clone()
    }

    /// Look up a recipe by id.
    pub fn get(&self, id: &str) -> Option<Recipe> {
        self.recipes.iter().find(|r| r.id == id).cloned()
    }

    /// Look up a recipe by exact name.
    pub fn find_by_name(&self, name: &str) -> Option<Recipe> {
        self.recipes.iter().find(|r| r.name == name).cloned()
    }

    /// Number of stored recipes.
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Delete a recipe by id. Returns whether something was removed;
    /// deleting an unknown id is not an error.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let Some(pos) = self.recipes.iter().position(|r| r.id == id) else {
            return Ok(false);
        };

        let mut next = self.recipes.clone();
        next.remove(pos);
        self.persist(&next)?;
        self.recipes = next;
        Ok(true)
    }

    /// Record that a recipe was successfully applied. Unknown ids are a
    /// quiet no-op: applying an unsaved recipe value is legal.
    pub fn touch_last_used(&mut self, id: &str) -> Result<()> {
        let Some(pos) = self.recipes.iter().position(|r| r.id == id) else {
            return Ok(());
        };

        let mut next = self.recipes.clone();
        next[pos].last_used = Some(Utc::now());
        self.persist(&next)?;
        self.recipes = next;
        Ok(())
    }

    fn persist(&self, recipes: &[Recipe]) -> Result<()> {
        let raw = serde_json::to_string_pretty(recipes)?;
        self.backend.set(RECIPES_KEY, &raw)
    }
}
