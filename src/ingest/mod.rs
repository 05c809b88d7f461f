//! File ingestion: mapping-table persistence and the vernacular source.

pub mod source;
pub mod tables;

pub use source::{SourceLine, VernacularSource};
pub use tables::{load_index, load_table, save_table};
