//! Main Melange struct and public API.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::input::Table;
use crate::recipe::{KeyValueStore, Recipe, RecipeStore};
use crate::transform;

/// Result of applying a recipe: the final table, or a structured failure
/// an embedding host can render without handling raw errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ApplyOutcome {
    Success { table: Table },
    Failed { error: String },
}

impl ApplyOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ApplyOutcome::Success { .. })
    }

    /// The final table, when the application succeeded.
    pub fn table(&self) -> Option<&Table> {
        match self {
            ApplyOutcome::Success { table } => Some(table),
            ApplyOutcome::Failed { .. } => None,
        }
    }

    /// The failure message, when the application failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            ApplyOutcome::Success { .. } => None,
            ApplyOutcome::Failed { error } => Some(error),
        }
    }
}

/// The melange engine: a recipe store plus the transformation pipeline.
pub struct Melange {
    store: RecipeStore,
}

impl Melange {
    /// Open an engine over the given persistence backend.
    pub fn open(backend: Box<dyn KeyValueStore>) -> Result<Self> {
        Ok(Self {
            store: RecipeStore::open(backend)?,
        })
    }

    /// Apply a stored recipe to the input tables.
    pub fn apply(&mut self, recipe_id: &str, tables: &[Table]) -> ApplyOutcome {
        let Some(recipe) = self.store.get(recipe_id) else {
            return ApplyOutcome::Failed {
                error: format!("recipe '{recipe_id}' not found"),
            };
        };
        self.apply_recipe(&recipe, tables)
    }

    /// Apply a recipe value directly.
    ///
    /// On success the recipe's usage timestamp is bumped through the
    /// store (a quiet no-op for recipes that were never saved); a
    /// persistence failure while recording it is reported as a failure.
    /// On failure the store is left untouched.
    pub fn apply_recipe(&mut self, recipe: &Recipe, tables: &[Table]) -> ApplyOutcome {
        match transform::run_recipe(recipe, tables) {
            Ok(table) => {
                if let Err(e) = self.store.touch_last_used(&recipe.id) {
                    return ApplyOutcome::Failed {
                        error: e.to_string(),
                    };
                }
                ApplyOutcome::Success { table }
            }
            Err(e) => ApplyOutcome::Failed {
                error: e.to_string(),
            },
        }
    }

    /// Save a recipe, returning the stored snapshot with its new id.
    pub fn save_recipe(&mut self, recipe: Recipe) -> Result<Recipe> {
        self.store.save(recipe)
    }

    /// All stored recipes.
    pub fn recipes(&self) -> Vec<Recipe> {
        self.store.list()
    }

    /// Look up a recipe by id.
    pub fn recipe(&self, id: &str) -> Option<Recipe> {
        self.store.get(id)
    }

    /// Look up a recipe by id, falling back to exact name.
    pub fn find_recipe(&self, id_or_name: &str) -> Option<Recipe> {
        self.store
            .get(id_or_name)
            .or_else(|| self.store.find_by_name(id_or_name))
    }

    /// Delete a recipe by id. Returns whether something was removed.
    pub fn delete_recipe(&mut self, id: &str) -> Result<bool> {
        self.store.delete(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::{MemoryStore, NewColumn};

    fn engine() -> Melange {
        Melange::open(Box::new(MemoryStore::new())).unwrap()
    }

    fn people() -> Table {
        Table::new(
            "people",
            vec!["name".to_string()],
            vec![vec!["ada".to_string()]],
        )
    }

    #[test]
    fn test_apply_marks_last_used() {
        let mut engine = engine();
        let recipe = engine
            .save_recipe(Recipe::new("tag").with_new_column(NewColumn::fixed("src", "x")))
            .unwrap();

        let outcome = engine.apply(&recipe.id, &[people()]);

        assert!(outcome.is_success());
        assert!(engine.recipe(&recipe.id).unwrap().last_used.is_some());
    }

    #[test]
    fn test_apply_unknown_recipe_fails() {
        let mut engine = engine();
        let outcome = engine.apply("rcp_missing", &[people()]);

        assert!(!outcome.is_success());
        assert!(outcome.error().unwrap().contains("not found"));
    }

    #[test]
    fn test_failed_apply_leaves_store_untouched() {
        let mut engine = engine();
        let recipe = engine.save_recipe(Recipe::new("nope")).unwrap();

        let outcome = engine.apply(&recipe.id, &[]);

        assert!(!outcome.is_success());
        assert!(engine.recipe(&recipe.id).unwrap().last_used.is_none());
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = ApplyOutcome::Failed {
            error: "boom".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["status"], "failed");
        assert_eq!(json["error"], "boom");
    }

    #[test]
    fn test_find_recipe_by_name() {
        let mut engine = engine();
        let stored = engine.save_recipe(Recipe::new("emails")).unwrap();

        assert_eq!(engine.find_recipe("emails").unwrap().id, stored.id);
        assert_eq!(engine.find_recipe(&stored.id).unwrap().id, stored.id);
        assert!(engine.find_recipe("other").is_none());
    }
}
