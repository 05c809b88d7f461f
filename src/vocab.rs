//! IRI and literal constants for the name-occurrence vocabulary.
//!
//! Every statement the pipeline emits uses a term defined here. Constants
//! hold absolute IRIs; the Turtle writer shortens them through the prefix
//! table in [`crate::graph`].

/// Ontology namespace (the `:` prefix in Turtle output).
pub const ONTOLOGY_NS: &str = "https://w3id.org/vern/ontology#";

/// RDF namespace (the `rdf:` prefix in Turtle output).
pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

/// Base IRI for name-occurrence subjects; the record identifier is appended.
pub const OCCURRENCE_BASE: &str = "http://vernacular/";

/// Base IRI for Plazi plant taxon concepts; the formatted scientific name
/// is appended.
pub const TAXON_BASE: &str = "http://taxon-concept.plazi.org/id/Plantae/";

/// Fixed provenance link for the digitized source volume.
pub const SOURCE_DOI: &str = "https://doi.org/10.5281/zenodo.293746";

/// Global area code literal: Germany, Austria, Switzerland, Liechtenstein,
/// South Tyrol.
pub const AREA_GLOBAL: &str = "DACHLS";

// =============================================================================
// Classes
// =============================================================================

/// Record type of every emitted subject.
pub const CLASS_NAME_OCCURRENCE: &str = "https://w3id.org/vern/ontology#NameOccurrence";

// =============================================================================
// Properties
// =============================================================================

/// `rdf:type`.
pub const PROP_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

/// `rdf:value`, carrying the literal name text.
pub const PROP_VALUE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#value";

/// Name status (book name vs. local name).
pub const PROP_STATUS: &str = "https://w3id.org/vern/ontology#vernacularNameStatus";

/// Provenance of the occurrence.
pub const PROP_SOURCE: &str = "https://w3id.org/vern/ontology#source";

/// Link to the taxon concept the name refers to.
pub const PROP_TAXON: &str = "https://w3id.org/vern/ontology#taxon";

/// Global area literal.
pub const PROP_AREA_GLOBAL: &str = "https://w3id.org/vern/ontology#areaGlobal";

/// Coarse area (canton) literal.
pub const PROP_AREA_COARSE: &str = "https://w3id.org/vern/ontology#areaCoarse";

/// Fine area (locality) literal.
pub const PROP_AREA_FINE: &str = "https://w3id.org/vern/ontology#areaFine";

// =============================================================================
// Status individuals
// =============================================================================

/// Status object for names attested in botanical literature.
pub const STATUS_BOOK_NAME: &str = "https://w3id.org/vern/ontology#bookName";

/// Status object for names attested directly in the field.
pub const STATUS_LOCAL_NAME: &str = "https://w3id.org/vern/ontology#localName";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ontology_terms_share_namespace() {
        for term in [
            CLASS_NAME_OCCURRENCE,
            PROP_STATUS,
            PROP_SOURCE,
            PROP_TAXON,
            PROP_AREA_GLOBAL,
            PROP_AREA_COARSE,
            PROP_AREA_FINE,
            STATUS_BOOK_NAME,
            STATUS_LOCAL_NAME,
        ] {
            assert!(term.starts_with(ONTOLOGY_NS), "{} outside ontology ns", term);
        }
    }

    #[test]
    fn rdf_terms_share_namespace() {
        assert!(PROP_TYPE.starts_with(RDF_NS));
        assert!(PROP_VALUE.starts_with(RDF_NS));
    }
}
