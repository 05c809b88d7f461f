//! Info command - Show pipeline and vocabulary info

use super::super::output::color;
use crate::ingest::tables;
use crate::latin::AUTHOR_MARKERS;
use crate::vocab;

/// Print pipeline, table, and vocabulary information.
pub fn run() -> Result<(), String> {
    println!();
    println!("{}", color("1;36", "vern"));
    println!("  Vernacular plant-name extraction and graph assembly");
    println!();
    println!("{}:", color("1;33", "Version"));
    println!("  {}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("{}:", color("1;33", "Stages"));
    println!("  harvest  geo corpus extract -> vern-canton / vern-loc tables + triples TSV");
    println!("  index    Latin corpus extract -> lat-book / lat-vern / vern-lat tables");
    println!("  author   cleaned name list -> tagged vernacular source");
    println!("  graph    tables + source + gazetteer -> RDF graph");
    println!();

    println!("{}:", color("1;33", "Table files"));
    for file in [
        tables::LAT_BOOK_FILE,
        tables::LAT_VERN_FILE,
        tables::VERN_LAT_FILE,
        tables::VERN_CANTON_FILE,
        tables::VERN_LOC_FILE,
    ] {
        println!("  {} {}", color("32", "*"), file);
    }
    println!();

    println!("{}:", color("1;33", "Author markers (Latin headings)"));
    println!("  {}", AUTHOR_MARKERS.join("  "));
    println!();

    println!("{}:", color("1;33", "Vocabulary"));
    println!("  ontology   {}", vocab::ONTOLOGY_NS);
    println!("  subjects   {}<id>", vocab::OCCURRENCE_BASE);
    println!("  taxa       {}<scientific>", vocab::TAXON_BASE);
    println!("  source     {}", vocab::SOURCE_DOI);
    println!("  area code  {}", vocab::AREA_GLOBAL);
    println!();

    Ok(())
}
