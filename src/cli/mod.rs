//! CLI library modules for the vern binary.
//!
//! This module provides reusable CLI functionality that can be tested
//! independently of the binary entry point.

pub mod commands;
pub mod output;
pub mod parser;
