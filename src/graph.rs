//! Graph assembly and serialization.
//!
//! Every accepted [`NameOccurrence`] becomes one subject with a fixed
//! statement layout:
//!
//! ```text
//! <http://vernacular/312> rdf:type :NameOccurrence ;
//!     rdf:value "Schnääball" ;
//!     :source <https://doi.org/10.5281/zenodo.293746> ;
//!     :vernacularNameStatus :localName ;
//!     :taxon <http://taxon-concept.plazi.org/id/Plantae/Viburnum_lantana> ;
//!     :areaCoarse "Bern" ;
//!     :areaFine "Wädenswil" ;
//!     :areaGlobal "DACHLS" .
//! ```
//!
//! Statements accumulate in emission order; the Turtle writer groups the
//! consecutive run of statements sharing a subject, the N-Triples writer
//! emits one absolute statement per line.

use std::fmt::Write as _;

use crate::name::place_label;
use crate::occurrence::{NameOccurrence, NameStatus};
use crate::vocab;

/// A node in object position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// An IRI reference.
    Iri(String),
    /// A plain string literal.
    Literal(String),
}

/// One subject-predicate-object statement. Subjects and predicates are
/// always IRIs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// Subject IRI.
    pub subject: String,
    /// Predicate IRI.
    pub predicate: String,
    /// Object node.
    pub object: Term,
}

/// Output serialization format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GraphFormat {
    /// Turtle, statements grouped by subject.
    #[default]
    Turtle,
    /// N-Triples, one statement per line.
    NTriples,
}

/// The accumulated output graph.
#[derive(Debug, Clone, Default)]
pub struct NameGraph {
    statements: Vec<Statement>,
}

impl NameGraph {
    /// An empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append all statements for one record.
    ///
    /// The name literal and both area literals have internal spaces
    /// replaced by underscores; area literals are additionally title-cased.
    /// The global area code is emitted on every record.
    pub fn push_occurrence(&mut self, record: &NameOccurrence) {
        let subject = format!("{}{}", vocab::OCCURRENCE_BASE, record.id);
        self.push_iri(&subject, vocab::PROP_TYPE, vocab::CLASS_NAME_OCCURRENCE);
        self.push_literal(&subject, vocab::PROP_VALUE, &record.name.replace(' ', "_"));
        self.push_iri(&subject, vocab::PROP_SOURCE, vocab::SOURCE_DOI);
        let status = match record.status {
            NameStatus::BookName => vocab::STATUS_BOOK_NAME,
            NameStatus::LocalName => vocab::STATUS_LOCAL_NAME,
        };
        self.push_iri(&subject, vocab::PROP_STATUS, status);
        if let Some(scientific) = &record.scientific {
            let taxon = format!("{}{}", vocab::TAXON_BASE, scientific.as_str());
            self.push_iri(&subject, vocab::PROP_TAXON, &taxon);
        }
        if let Some(canton) = &record.canton {
            self.push_literal(&subject, vocab::PROP_AREA_COARSE, &place_label(canton));
        }
        if let Some(locality) = &record.locality {
            self.push_literal(&subject, vocab::PROP_AREA_FINE, &place_label(locality));
        }
        self.push_literal(&subject, vocab::PROP_AREA_GLOBAL, vocab::AREA_GLOBAL);
    }

    /// Serialize in the requested format.
    #[must_use]
    pub fn serialize(&self, format: GraphFormat) -> String {
        match format {
            GraphFormat::Turtle => self.to_turtle(),
            GraphFormat::NTriples => self.to_ntriples(),
        }
    }

    /// Turtle with the `:` and `rdf:` prefixes; consecutive statements
    /// sharing a subject join into one block.
    #[must_use]
    pub fn to_turtle(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "@prefix : <{}> .", vocab::ONTOLOGY_NS);
        let _ = writeln!(out, "@prefix rdf: <{}> .", vocab::RDF_NS);

        let mut statements = self.statements.iter().peekable();
        while let Some(first) = statements.next() {
            out.push('\n');
            let _ = write!(
                out,
                "<{}> {} {}",
                first.subject,
                shorten(&first.predicate),
                turtle_term(&first.object)
            );
            while let Some(next) = statements.next_if(|s| s.subject == first.subject) {
                let _ = write!(
                    out,
                    " ;\n    {} {}",
                    shorten(&next.predicate),
                    turtle_term(&next.object)
                );
            }
            out.push_str(" .\n");
        }
        out
    }

    /// N-Triples, absolute IRIs throughout.
    #[must_use]
    pub fn to_ntriples(&self) -> String {
        let mut out = String::new();
        for statement in &self.statements {
            let _ = writeln!(
                out,
                "<{}> <{}> {} .",
                statement.subject,
                statement.predicate,
                ntriples_term(&statement.object)
            );
        }
        out
    }

    /// All statements in emission order.
    #[must_use]
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Statement count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// True if nothing has been pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    fn push_iri(&mut self, subject: &str, predicate: &str, object: &str) {
        self.statements.push(Statement {
            subject: subject.to_string(),
            predicate: predicate.to_string(),
            object: Term::Iri(object.to_string()),
        });
    }

    fn push_literal(&mut self, subject: &str, predicate: &str, object: &str) {
        self.statements.push(Statement {
            subject: subject.to_string(),
            predicate: predicate.to_string(),
            object: Term::Literal(object.to_string()),
        });
    }
}

/// Shorten an IRI through the prefix table, or wrap it in angle brackets.
fn shorten(iri: &str) -> String {
    if let Some(local) = iri.strip_prefix(vocab::ONTOLOGY_NS) {
        format!(":{local}")
    } else if let Some(local) = iri.strip_prefix(vocab::RDF_NS) {
        format!("rdf:{local}")
    } else {
        format!("<{iri}>")
    }
}

fn turtle_term(object: &Term) -> String {
    match object {
        Term::Iri(iri) => shorten(iri),
        Term::Literal(text) => format!("\"{}\"", escape_literal(text)),
    }
}

fn ntriples_term(object: &Term) -> String {
    match object {
        Term::Iri(iri) => format!("<{iri}>"),
        Term::Literal(text) => format!("\"{}\"", escape_literal(text)),
    }
}

fn escape_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

// =============================================================================
// Tests
// =============================================================================
