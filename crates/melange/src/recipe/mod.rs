//! Recipe data model and storage.

mod model;
mod store;

pub use model::{
    ColumnMapping, ColumnSource, ConditionalRule, MergeStrategy, NewColumn, Recipe,
};
pub use store::{FileStore, KeyValueStore, MemoryStore, RecipeStore, RECIPES_KEY};
