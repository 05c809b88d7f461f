//! Latin-source parsing: scientific names, their book names, and their
//! vernaculars.
//!
//! The `lat-bookname-vernacular` corpus extract interleaves two line shapes,
//! plus page-number noise:
//!
//! ```text
//! Viburnum lantana L. Schneeball, Wolliger Schneeball
//! Schnääball, Schneballe
//! 124
//! ```
//!
//! A heading line carries an author abbreviation marker; everything left of
//! the marker is the Latin name, everything right of it the book names. The
//! heading's [`ScientificName`] stays current until the next heading, and
//! continuation lines attribute their vernacular names to it.
//!
//! [`parse_latin_line`] is a pure function mapping one line to a
//! [`LatinLine`]. The current-scientific-name context lives in an explicit
//! [`LatinScan`] state that appends parsed pairs into a [`CrossIndex`].
//!
//! # Usage
//!
//! ```
//! use vern::latin::LatinScan;
//!
//! let mut scan = LatinScan::new();
//! scan.observe("Viburnum lantana L. Schneeball, Wolliger Schneeball");
//! scan.observe("Schnääball, Schneballe");
//! let outcome = scan.finish();
//! assert_eq!(
//!     outcome.index.lat_book.get("Viburnum_lantana"),
//!     ["Schneeball", "Wolliger Schneeball"]
//! );
//! assert_eq!(outcome.index.vern_lat.get("Schnääball"), ["Viburnum_lantana"]);
//! ```

use std::fmt;

use serde::Serialize;

use crate::index::CrossIndex;
use crate::name::{clean_name, is_pure_digits, is_roman_token, ScientificName};

/// Author abbreviation markers, checked in list order; the first marker the
/// line contains wins, and the line splits at that marker's first occurrence.
/// The parenthesized form precedes the bare `L.` so it wins when both occur.
// "Milk" is an OCR misreading of "Mill." that survives in the corpus.
pub const AUTHOR_MARKERS: [&str; 8] = [
    "(L.) Crantz",
    "L.",
    "Ehrh.",
    "Ehr.",
    "Mill.",
    "Milk",
    "Gleditsch",
    "Huds.",
];

// =============================================================================
// Parsing
// =============================================================================

/// Parse of one Latin-source line.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LatinLine {
    /// Blank line, pure digit string, digit-led line, or a single
    /// roman-numeral token.
    SkipNoise,
    /// Author marker found: a new current scientific name, plus the book
    /// names listed after the marker (possibly none).
    Heading {
        /// Scientific name parsed from the marker's left side.
        scientific: ScientificName,
        /// Cleaned book names from the marker's right side.
        book_names: Vec<String>,
    },
    /// No marker: vernacular names for the current scientific name.
    Vernaculars(Vec<String>),
    /// Author marker found but no Latin name survives left of it.
    Malformed,
}

/// Classify and split one line of the Latin source.
///
/// Noise shapes drop before marker detection, so a page header that happens
/// to contain a marker never becomes a heading.
#[must_use]
pub fn parse_latin_line(line: &str) -> LatinLine {
    let line = line.trim();
    if line.is_empty() || is_pure_digits(line) || is_roman_token(line) {
        return LatinLine::SkipNoise;
    }
    if let Some(first) = line.split(' ').next() {
        if is_pure_digits(first.trim_end_matches([',', ';'])) {
            return LatinLine::SkipNoise;
        }
    }

    match find_marker(line) {
        Some((at, marker)) => {
            let latin_side = &line[..at];
            let book_side = &line[at + marker.len()..];
            match ScientificName::from_latin(latin_side) {
                Some(scientific) => LatinLine::Heading {
                    scientific,
                    book_names: split_names(&strip_author_residue(book_side)),
                },
                None => LatinLine::Malformed,
            }
        }
        None => LatinLine::Vernaculars(split_names(line)),
    }
}

/// First marker (in [`AUTHOR_MARKERS`] order) the line contains, with the
/// byte offset of its first occurrence.
fn find_marker(line: &str) -> Option<(usize, &'static str)> {
    AUTHOR_MARKERS
        .iter()
        .find_map(|marker| line.find(marker).map(|at| (at, *marker)))
}

/// Strip the residue a partial marker match leaves on the book-name side,
/// e.g. `") Crantz Weissdorn"` when a mis-set `(L.) Crantz` split on `L.`.
fn strip_author_residue(side: &str) -> String {
    side.replace(')', "").replace("Crantz ", "")
}

/// Split a name list on `", "` and clean each segment; empties drop.
fn split_names(side: &str) -> Vec<String> {
    side.split(", ")
        .map(clean_name)
        .filter(|name| !name.is_empty())
        .collect()
}

// =============================================================================
// Scan state
// =============================================================================

/// Counters for one Latin-source scan.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IndexStats {
    /// Lines observed.
    pub lines: usize,
    /// Heading lines parsed into a scientific name.
    pub headings: usize,
    /// (scientific, book name) pairs appended.
    pub book_names: usize,
    /// Continuation vernacular names appended.
    pub vernaculars: usize,
    /// Marker lines with no usable Latin name, plus continuations seen
    /// before any heading.
    pub malformed: usize,
}

impl fmt::Display for IndexStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Index:")?;
        writeln!(f, "  Lines: {}", self.lines)?;
        writeln!(f, "  Headings: {}", self.headings)?;
        writeln!(f, "  Book names: {}", self.book_names)?;
        writeln!(f, "  Vernacular names: {}", self.vernaculars)?;
        writeln!(f, "  Malformed lines: {}", self.malformed)?;
        Ok(())
    }
}

/// Result of a finished Latin scan.
#[derive(Debug)]
pub struct LatinOutcome {
    /// Index with the three Latin-side tables populated.
    pub index: CrossIndex,
    /// Scan counters.
    pub stats: IndexStats,
}

/// Explicit state for a line-by-line Latin-source scan.
///
/// Owns the current-scientific-name context; every
/// [`observe`](Self::observe) call both parses the line and advances the
/// state, appending book-name and vernacular pairs into the index.
#[derive(Debug, Default)]
pub struct LatinScan {
    current: Option<ScientificName>,
    index: CrossIndex,
    stats: IndexStats,
}

impl LatinScan {
    /// Start a scan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one line and fold it into the index.
    pub fn observe(&mut self, line: &str) -> LatinLine {
        let parsed = parse_latin_line(line);
        self.stats.lines += 1;
        match &parsed {
            LatinLine::SkipNoise => {}
            LatinLine::Malformed => self.stats.malformed += 1,
            LatinLine::Heading {
                scientific,
                book_names,
            } => {
                self.stats.headings += 1;
                for book in book_names {
                    if self.index.add_book_name(scientific, book) {
                        self.stats.book_names += 1;
                    }
                }
                self.current = Some(scientific.clone());
            }
            LatinLine::Vernaculars(names) if names.is_empty() => {}
            LatinLine::Vernaculars(names) => {
                if let Some(scientific) = self.current.clone() {
                    for name in names {
                        if self.index.add_vernacular(&scientific, name) {
                            self.stats.vernaculars += 1;
                        }
                    }
                } else {
                    self.stats.malformed += 1;
                }
            }
        }
        parsed
    }

    /// Finish the scan, yielding the index and counters.
    #[must_use]
    pub fn finish(self) -> LatinOutcome {
        LatinOutcome {
            index: self.index,
            stats: self.stats,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_shapes_drop() {
        let cases = ["", "   ", "124", "IV", "VIII", "12, Ahorn", "7; Ahorn"];
        for line in cases {
            assert_eq!(parse_latin_line(line), LatinLine::SkipNoise, "{line:?}");
        }
    }

    #[test]
    fn heading_splits_at_bare_l_marker() {
        let parsed = parse_latin_line("Viburnum lantana L. Schneeball, Wolliger Schneeball");
        match parsed {
            LatinLine::Heading {
                scientific,
                book_names,
            } => {
                assert_eq!(scientific.as_str(), "Viburnum_lantana");
                assert_eq!(book_names, ["Schneeball", "Wolliger Schneeball"]);
            }
            other => panic!("expected heading, got {other:?}"),
        }
    }

    #[test]
    fn parenthesized_crantz_marker_wins_over_bare_l() {
        let parsed = parse_latin_line("Crataegus oxyacantha (L.) Crantz Weissdorn");
        match parsed {
            LatinLine::Heading {
                scientific,
                book_names,
            } => {
                assert_eq!(scientific.as_str(), "Crataegus_oxyacantha");
                assert_eq!(book_names, ["Weissdorn"]);
            }
            other => panic!("expected heading, got {other:?}"),
        }
    }

    #[test]
    fn longer_marker_precedes_its_prefix() {
        let parsed = parse_latin_line("Fagus silvatica Ehrh. Buche");
        match parsed {
            LatinLine::Heading {
                scientific,
                book_names,
            } => {
                assert_eq!(scientific.as_str(), "Fagus_silvatica");
                assert_eq!(book_names, ["Buche"]);
            }
            other => panic!("expected heading, got {other:?}"),
        }
    }

    #[test]
    fn crantz_residue_is_stripped_from_book_side() {
        // OCR broke the parenthesized form, so the split falls back to the
        // bare marker and leaves ") Crantz" on the right.
        let parsed = parse_latin_line("Crataegus oxyacantha (L. ) Crantz Weissdorn");
        match parsed {
            LatinLine::Heading {
                scientific,
                book_names,
            } => {
                assert_eq!(scientific.as_str(), "Crataegus_oxyacantha");
                assert_eq!(book_names, ["Weissdorn"]);
            }
            other => panic!("expected heading, got {other:?}"),
        }
    }

    #[test]
    fn heading_without_book_names_still_sets_current() {
        let mut scan = LatinScan::new();
        assert!(matches!(
            scan.observe("Tilia cordata Mill."),
            LatinLine::Heading { .. }
        ));
        scan.observe("Linde, Winterlinde");
        let outcome = scan.finish();
        assert!(outcome.index.lat_book.is_empty());
        assert_eq!(
            outcome.index.lat_vern.get("Tilia_cordata"),
            ["Linde", "Winterlinde"]
        );
        assert_eq!(outcome.stats.headings, 1);
        assert_eq!(outcome.stats.book_names, 0);
        assert_eq!(outcome.stats.vernaculars, 2);
    }

    #[test]
    fn marker_with_no_latin_side_is_malformed() {
        assert_eq!(parse_latin_line("L. Schneeball"), LatinLine::Malformed);
        let mut scan = LatinScan::new();
        scan.observe("L. Schneeball");
        let outcome = scan.finish();
        assert_eq!(outcome.stats.malformed, 1);
        assert!(outcome.index.lat_book.is_empty());
    }

    #[test]
    fn continuation_before_any_heading_is_malformed() {
        let mut scan = LatinScan::new();
        scan.observe("Schnääball, Schneballe");
        let outcome = scan.finish();
        assert_eq!(outcome.stats.malformed, 1);
        assert!(outcome.index.vern_lat.is_empty());
    }

    #[test]
    fn continuations_follow_the_most_recent_heading() {
        let mut scan = LatinScan::new();
        scan.observe("Viburnum lantana L. Schneeball");
        scan.observe("Schnääball");
        scan.observe("Viburnum opulus L. Wasserholder");
        scan.observe("Schneballe, Glasrose");
        let outcome = scan.finish();
        assert_eq!(outcome.index.vern_lat.get("Schnääball"), ["Viburnum_lantana"]);
        assert_eq!(outcome.index.vern_lat.get("Schneballe"), ["Viburnum_opulus"]);
        assert_eq!(outcome.index.vern_lat.get("Glasrose"), ["Viburnum_opulus"]);
        assert_eq!(
            outcome.index.lat_vern.get("Viburnum_opulus"),
            ["Schneballe", "Glasrose"]
        );
        assert_eq!(outcome.stats.headings, 2);
        assert_eq!(outcome.stats.vernaculars, 3);
    }

    #[test]
    fn roman_numeral_tokens_drop_from_names() {
        let mut scan = LatinScan::new();
        scan.observe("Acer campestre L. Feldahorn II");
        let outcome = scan.finish();
        assert_eq!(outcome.index.lat_book.get("Acer_campestre"), ["Feldahorn"]);
    }
}
