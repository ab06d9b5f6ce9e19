//! Input parsing and the tabular value model.

mod parser;
mod source;

pub use parser::{Parser, ParserConfig};
pub use source::{SourceMetadata, Table};
