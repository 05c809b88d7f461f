//! The assembler's driving source file.
//!
//! Line-oriented, `<author>\t<predicate>\t<name>`, produced by the author
//! stage and iterated in file order. Malformed lines are skipped and
//! counted, never fatal.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// The fixed predicate token of the source format.
pub const USES_VERNACULAR_NAME: &str = "uses_vernacular_name";

/// One parsed source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// Author token, upper-cased by the author stage.
    pub author: String,
    /// The vernacular or book name.
    pub name: String,
}

/// The parsed vernacular source.
#[derive(Debug, Clone, Default)]
pub struct VernacularSource {
    /// Lines in file order.
    pub lines: Vec<SourceLine>,
    /// Lines skipped for a bad field count or an empty name.
    pub skipped: usize,
}

impl VernacularSource {
    /// Load and parse a source file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::invalid_input(format!("Failed to read source {:?}: {}", path, e))
        })?;
        let source = Self::from_lines(content.lines());
        if source.skipped > 0 {
            log::warn!(
                "skipped {} malformed line(s) in source {:?}",
                source.skipped,
                path
            );
        }
        Ok(source)
    }

    /// Parse from an iterator of lines. A line must carry exactly three
    /// tab-separated fields and a non-empty name; anything else is counted
    /// as skipped. Blank lines are ignored.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut source = VernacularSource::default();
        for line in lines {
            let line = line.as_ref();
            if line.trim().is_empty() {
                continue;
            }
            let mut fields = line.split('\t');
            match (fields.next(), fields.next(), fields.next(), fields.next()) {
                (Some(author), Some(_predicate), Some(name), None)
                    if !name.trim().is_empty() =>
                {
                    source.lines.push(SourceLine {
                        author: author.trim().to_string(),
                        name: name.trim().to_string(),
                    });
                }
                _ => source.skipped += 1,
            }
        }
        source
    }

    /// The names, in file order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|l| l.name.as_str())
    }

    /// Number of parsed lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True if nothing was parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Tag each non-blank line with an upper-cased author token, producing the
/// source format consumed by [`VernacularSource`].
pub fn tag_author_lines<'a, I>(author: &str, lines: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let author = author.to_uppercase();
    lines
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| format!("{}\t{}\t{}", author, USES_VERNACULAR_NAME, line.trim()))
        .collect()
}
