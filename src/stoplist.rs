//! Exclusion lists consulted while harvesting candidates.
//!
//! A stoplist is a flat file of one token per line (a gazetteer of
//! geographic terms, a list of Latin genus names). Candidates whose name is
//! listed never enter the mapping tables.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// A set of excluded name tokens.
#[derive(Debug, Clone, Default)]
pub struct Stoplist {
    entries: BTreeSet<String>,
}

impl Stoplist {
    /// An empty stoplist (filters nothing).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a stoplist from a line-oriented file. Blank lines are ignored.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::invalid_input(format!("Failed to read stoplist {:?}: {}", path, e))
        })?;
        Ok(Self::from_lines(content.lines()))
    }

    /// Build a stoplist from an iterator of tokens.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = lines
            .into_iter()
            .map(|l| l.as_ref().trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();
        Stoplist { entries }
    }

    /// True if the name is excluded.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains(name)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the stoplist has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
