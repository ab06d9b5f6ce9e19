//! Table merging: append (header union from the first table) and inner join.

use indexmap::IndexSet;

use crate::error::{MelangeError, Result};
use crate::input::Table;
use crate::recipe::MergeStrategy;

/// Combine tables according to the merge strategy.
///
/// A single input table passes through unchanged regardless of strategy;
/// an empty input list is an error.
pub fn merge(
    tables: &[Table],
    strategy: MergeStrategy,
    join_column: Option<&str>,
) -> Result<Table> {
    match tables {
        [] => Err(MelangeError::EmptyData(
            "no input tables to merge".to_string(),
        )),
        [single] => Ok(single.clone()),
        _ => match strategy {
            MergeStrategy::Append => Ok(append(tables)),
            MergeStrategy::Join => join(tables, join_column),
        },
    }
}

/// Stack rows from every table, aligned by header name to the first
/// table's headers. A header the contributing table lacks reads as "";
/// headers that only exist in later tables are dropped. The first table
/// fixes the output shape.
fn append(tables: &[Table]) -> Table {
    let headers = tables[0].headers.clone();
    let mut rows = Vec::new();

    for table in tables {
        let positions: Vec<Option<usize>> =
            headers.iter().map(|h| table.column_index(h)).collect();

        for row_idx in 0..table.row_count() {
            let row = positions
                .iter()
                .map(|pos| match pos {
                    Some(col) => table.cell(row_idx, *col).to_string(),
                    None => String::new(),
                })
                .collect();
            rows.push(row);
        }
    }

    Table::new(merged_name(tables), headers, rows)
}

/// Inner join of exactly two tables on a shared key column. Each left
/// row is emitted once per matching right row (cross-product expansion);
/// left rows without a match contribute nothing. Output headers are the
/// left headers followed by right headers not already present.
fn join(tables: &[Table], join_column: Option<&str>) -> Result<Table> {
    if tables.len() != 2 {
        return Err(MelangeError::MergeArity { got: tables.len() });
    }

    let column = match join_column {
        Some(c) if !c.trim().is_empty() => c,
        _ => {
            return Err(MelangeError::InvalidRecipe(
                "join strategy requires a join column".to_string(),
            ));
        }
    };

    let (left, right) = (&tables[0], &tables[1]);
    let left_key = left
        .column_index(column)
        .ok_or_else(|| MelangeError::ColumnNotFound {
            column: column.to_string(),
            table: left.name.clone(),
        })?;
    let right_key = right
        .column_index(column)
        .ok_or_else(|| MelangeError::ColumnNotFound {
            column: column.to_string(),
            table: right.name.clone(),
        })?;

    // First-seen-wins header de-dup: a right header that collides with a
    // left header is dropped, and its cells come from the left row.
    let mut header_set: IndexSet<String> = left.headers.iter().cloned().collect();
    let mut right_extra = Vec::new();
    for (idx, header) in right.headers.iter().enumerate() {
        if header_set.insert(header.clone()) {
            right_extra.push(idx);
        }
    }
    let headers: Vec<String> = header_set.into_iter().collect();

    let mut rows = Vec::new();
    for left_idx in 0..left.row_count() {
        let key = left.cell(left_idx, left_key);

        for right_idx in 0..right.row_count() {
            // Exact, case-sensitive string equality. No trimming.
            if right.cell(right_idx, right_key) != key {
                continue;
            }

            let mut row: Vec<String> = (0..left.headers.len())
                .map(|col| left.cell(left_idx, col).to_string())
                .collect();
            row.extend(
                right_extra
                    .iter()
                    .map(|&col| right.cell(right_idx, col).to_string()),
            );
            rows.push(row);
        }
    }

    Ok(Table::new(merged_name(tables), headers, rows))
}

fn merged_name(tables: &[Table]) -> String {
    tables
        .iter()
        .map(|t| t.name.as_str())
        .collect::<Vec<_>>()
        .join(" + ")
}
