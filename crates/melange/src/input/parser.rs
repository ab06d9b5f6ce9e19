//! CSV/TSV parsing into the engine's table model.
//!
//! The delimiter is always supplied by the caller; this parser performs
//! no content sniffing. Rows are handed to the engine exactly as read,
//! including ragged rows, which the [`Table`] accessors tolerate.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use super::source::{SourceMetadata, Table};
use crate::error::{MelangeError, Result};

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Field delimiter.
    pub delimiter: u8,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Parses tabular data files.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the table and source metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(Table, SourceMetadata)> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| MelangeError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(|e| MelangeError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let table = self.parse_bytes(&contents, &name)?;

        let format = match self.config.delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            _ => "delimited",
        }
        .to_string();

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            format,
            table.row_count(),
            table.column_count(),
        );

        Ok((table, metadata))
    }

    /// Parse raw bytes into a table with the given name.
    pub fn parse_bytes(&self, bytes: &[u8], name: &str) -> Result<Table> {
        let mut reader = self.reader(bytes);

        let headers: Vec<String> = if self.config.has_header {
            reader.headers()?.iter().map(|s| s.trim().to_string()).collect()
        } else {
            match reader.records().next() {
                Some(Ok(record)) => (0..record.len())
                    .map(|i| format!("column_{}", i + 1))
                    .collect(),
                Some(Err(e)) => return Err(e.into()),
                None => return Err(MelangeError::EmptyData("no data rows found".to_string())),
            }
        };

        if headers.is_empty() {
            return Err(MelangeError::EmptyData("no columns found".to_string()));
        }

        // Re-create the reader: the generated-headers probe above may
        // have consumed the first record.
        let mut reader = self.reader(bytes);
        let mut rows = Vec::new();

        for result in reader.records() {
            if let Some(max) = self.config.max_rows {
                if rows.len() >= max {
                    break;
                }
            }

            let record = result?;
            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        Ok(Table::new(name, headers, rows))
    }

    fn reader<'a>(&self, bytes: &'a [u8]) -> csv::Reader<&'a [u8]> {
        csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}
