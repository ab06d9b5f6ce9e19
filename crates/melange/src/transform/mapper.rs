//! Header renames.

use crate::input::Table;
use crate::recipe::ColumnMapping;

/// Apply renames in list order. Each mapping replaces the header exactly
/// equal to its source with its target, by position; a miss is a no-op.
/// Because mappings run in order, a later mapping may retarget a header
/// an earlier one just produced. Row data is untouched.
pub fn apply_mappings(table: &Table, mappings: &[ColumnMapping]) -> Table {
    let mut mapped = table.clone();

    for mapping in mappings {
        if let Some(pos) = mapped.column_index(&mapping.source_column) {
            mapped.headers[pos] = mapping.target_column.clone();
        }
    }

    mapped
}
