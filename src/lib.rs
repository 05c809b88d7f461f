//! # vern
//!
//! Vernacular plant-name extraction for cleaned OCR corpora.
//!
//! - **Harvest**: pull canton-attributed folk names out of the geographic
//!   corpus extract
//! - **Index**: parse the Latin corpus extract into scientific-name tables
//! - **Assemble**: cross-reference a vernacular source against the tables
//!   and a gazetteer into deduplicated name occurrences
//! - **Serialize**: write the occurrences as an RDF graph (Turtle or
//!   N-Triples)
//!
//! ## Pipeline
//!
//! ```text
//! geo corpus ----> GeoScan ----> vern-canton / vern-loc tables
//! Latin corpus --> LatinScan --> lat-book / lat-vern / vern-lat tables
//! name list -----> author tag -> vernacular source TSV
//!
//! tables + source + gazetteer --> Assembler --> NameGraph --> .ttl / .nt
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use vern::LatinScan;
//!
//! let mut scan = LatinScan::new();
//! scan.observe("Viburnum lantana L. Wolliger Schneeball");
//! scan.observe("Schlingbaum, Schlingen");
//! let index = scan.finish().index.finalize();
//!
//! assert!(index.is_book_name("Wolliger Schneeball"));
//! assert_eq!(index.scientifics_for("Schlingbaum"), ["Viburnum_lantana"]);
//! ```
//!
//! ## Design Notes
//!
//! - **Deterministic output**: every table and the serialized graph iterate
//!   in lexicographic key order with first-seen value order, so reruns over
//!   the same corpus are byte-identical
//! - **Explicit scan state**: corpus scans are stateful structs
//!   ([`GeoScan`], [`LatinScan`]) whose per-line decisions are visible
//!   branches, not shared mutable globals
//! - **Tables are plain JSON**: every intermediate is a string-to-strings
//!   mapping that can be inspected or diffed between stages

#![warn(missing_docs)]

pub mod assemble;
pub mod classify;
pub mod cli;
pub mod error;
pub mod gazetteer;
pub mod geo;
pub mod graph;
pub mod index;
pub mod ingest;
pub mod latin;
pub mod name;
pub mod occurrence;
pub mod pipeline;
pub mod stoplist;
pub mod vocab;

pub use assemble::{AssembleStats, Assembler, UnlinkedPolicy};
pub use classify::{Candidate, GeoRecord, GeoScan, LineClass, ScanOutcome, ScanStats};
pub use error::{Error, Result};
pub use gazetteer::Gazetteer;
pub use geo::{GeoOutcome, GeoResolver};
pub use graph::{GraphFormat, NameGraph, Statement, Term};
pub use index::{CrossIndex, FinalizedIndex, MappingTable};
pub use latin::{IndexStats, LatinLine, LatinOutcome, LatinScan};
pub use name::ScientificName;
pub use occurrence::{NameOccurrence, NameStatus};
pub use pipeline::{PipelineConfig, PipelineReport};
pub use stoplist::Stoplist;
