//! Output collaborator: table serialization for export.

mod writer;

pub use writer::{to_delimited, to_json_objects};
