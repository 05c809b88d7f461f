//! Command implementations for the vern CLI
//!
//! Each pipeline stage has its own module/file.

pub mod author;
pub mod graph;
pub mod harvest;
pub mod index;
pub mod info;

// Re-export argument types for parser
pub use author::AuthorArgs;
pub use graph::GraphArgs;
pub use harvest::HarvestArgs;
pub use index::IndexArgs;
