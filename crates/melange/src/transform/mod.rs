//! The transformation pipeline: merge, rename, synthesize.

mod mapper;
mod merge;
mod synthesize;

pub use mapper::apply_mappings;
pub use merge::merge;
pub use synthesize::add_columns;

use crate::error::{MelangeError, Result};
use crate::input::Table;
use crate::recipe::Recipe;

/// Run a recipe over the input tables.
///
/// Step order is fixed: merge (passthrough for a single table), rename
/// headers, append synthesized columns. The first failing step aborts;
/// no partial output escapes.
pub fn run_recipe(recipe: &Recipe, tables: &[Table]) -> Result<Table> {
    if tables.is_empty() {
        return Err(MelangeError::EmptyData(
            "recipe application requires at least one input table".to_string(),
        ));
    }

    let merged = merge(tables, recipe.merge_strategy, recipe.join_column.as_deref())?;
    let mapped = apply_mappings(&merged, &recipe.column_mappings);
    Ok(add_columns(&mapped, &recipe.new_columns))
}
