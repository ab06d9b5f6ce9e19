//! Melange: recipe-driven merge and transformation engine for tabular data.
//!
//! Melange combines CSV-like tables (append or inner join), renames
//! columns, and synthesizes new columns from fixed values, concatenation
//! formulas, or first-match conditional rules — all described by named,
//! reusable recipes that persist through a pluggable key-value backend.
//!
//! # Core Principles
//!
//! - **Recipes are data**: a recipe is a serializable value, not code.
//!   Conditions are parsed against a fixed grammar, never evaluated as
//!   expressions.
//! - **Total synthesis**: formula and condition evaluation never fails;
//!   a malformed condition is simply false.
//! - **Ragged-input tolerant**: rows shorter than the header row read as
//!   empty cells, never a panic.
//!
//! # Example
//!
//! ```
//! use melange::{Melange, MemoryStore, NewColumn, Recipe, Table};
//!
//! let mut engine = Melange::open(Box::new(MemoryStore::new())).unwrap();
//! let recipe = engine
//!     .save_recipe(
//!         Recipe::new("emails")
//!             .with_new_column(NewColumn::formula("email", "'[name]' + '@x.com'")),
//!     )
//!     .unwrap();
//!
//! let table = Table::new(
//!     "people",
//!     vec!["name".to_string()],
//!     vec![vec!["ada".to_string()]],
//! );
//!
//! let outcome = engine.apply(&recipe.id, &[table]);
//! let result = outcome.table().unwrap();
//! assert_eq!(result.cell(0, 1), "ada@x.com");
//! ```

pub mod error;
pub mod export;
pub mod input;
pub mod recipe;
pub mod transform;

mod melange;

pub use crate::melange::{ApplyOutcome, Melange};
pub use error::{MelangeError, Result};
pub use input::{Parser, ParserConfig, SourceMetadata, Table};
pub use recipe::{
    ColumnMapping, ColumnSource, ConditionalRule, FileStore, KeyValueStore, MemoryStore,
    MergeStrategy, NewColumn, Recipe, RecipeStore,
};
