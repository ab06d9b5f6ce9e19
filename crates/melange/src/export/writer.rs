//! Table serialization for export.

use serde_json::{Map, Value};

use crate::error::{MelangeError, Result};
use crate::input::Table;

/// Serialize a table to delimited text. The header row defines the
/// shape: ragged rows are padded (or truncated) to the header width.
pub fn to_delimited(table: &Table, delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(&table.headers)?;

    let width = table.headers.len();
    for row_idx in 0..table.row_count() {
        let record: Vec<&str> = (0..width).map(|col| table.cell(row_idx, col)).collect();
        writer.write_record(&record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| MelangeError::Export(e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Serialize a table to a JSON array of objects keyed by header.
/// Missing cells become empty strings; cells past the header width are
/// dropped.
pub fn to_json_objects(table: &Table) -> Value {
    let mut records = Vec::with_capacity(table.row_count());

    for row_idx in 0..table.row_count() {
        let mut object = Map::new();
        for (col, header) in table.headers.iter().enumerate() {
            object.insert(
                header.clone(),
                Value::String(table.cell(row_idx, col).to_string()),
            );
        }
        records.push(Value::Object(object));
    }

    Value::Array(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ragged_table() -> Table {
        Table::new(
            "t",
            vec!["a".to_string(), "b".to_string()],
            vec![
                vec!["1".to_string(), "2".to_string()],
                vec!["3".to_string()],
            ],
        )
    }

    #[test]
    fn test_delimited_pads_ragged_rows() {
        let out = to_delimited(&ragged_table(), b',').unwrap();
        assert_eq!(out, "a,b\n1,2\n3,\n");
    }

    #[test]
    fn test_delimited_tsv() {
        let out = to_delimited(&ragged_table(), b'\t').unwrap();
        assert!(out.starts_with("a\tb\n"));
    }

    #[test]
    fn test_json_objects_keyed_by_header() {
        let value = to_json_objects(&ragged_table());

        assert_eq!(value[0]["a"], "1");
        assert_eq!(value[1]["a"], "3");
        assert_eq!(value[1]["b"], "");
    }
}
