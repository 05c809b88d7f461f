//! End-to-end graph run orchestration.
//!
//! Loads the persisted mapping tables, the gazetteer, and the vernacular
//! source, drives the assembler over the source in file order, sweeps the
//! unattested book names, and serializes the graph. One call, one run;
//! every table is rebuilt from the files, so repeated runs over identical
//! inputs produce identical output.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use serde::Serialize;

use crate::assemble::{AssembleStats, Assembler, UnlinkedPolicy};
use crate::error::{Error, Result};
use crate::gazetteer::Gazetteer;
use crate::geo::GeoResolver;
use crate::graph::{GraphFormat, NameGraph};
use crate::ingest::{tables, VernacularSource};

/// Configuration of one graph run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory holding the five mapping-table files.
    pub tables_dir: PathBuf,
    /// The driving vernacular source file.
    pub source: PathBuf,
    /// Canonical gazetteer file; without one every locality is standalone.
    pub gazetteer: Option<PathBuf>,
    /// Output file for the serialized graph.
    pub output: PathBuf,
    /// Serialization format.
    pub format: GraphFormat,
    /// Policy for names with no linked scientific name.
    pub policy: UnlinkedPolicy,
}

/// Summary of one finished run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    /// Source lines parsed.
    pub source_lines: usize,
    /// Source lines skipped as malformed.
    pub source_skipped: usize,
    /// Assembly counters.
    pub assembly: AssembleStats,
    /// Statements serialized.
    pub statements: usize,
}

impl PipelineReport {
    /// Names considered: source names plus swept book names.
    #[must_use]
    pub fn candidates(&self) -> usize {
        self.assembly.source_names + self.assembly.swept
    }

    /// Records emitted.
    #[must_use]
    pub fn accepted(&self) -> usize {
        self.assembly.emitted()
    }

    /// Everything absorbed without a record: malformed source lines,
    /// unlinked names, suppressed standalone duplicates.
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.source_skipped + self.assembly.skipped_unlinked + self.assembly.standalone_suppressed
    }
}

impl fmt::Display for PipelineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pipeline:")?;
        writeln!(f, "  Source lines: {}", self.source_lines)?;
        writeln!(f, "  Source skipped (malformed): {}", self.source_skipped)?;
        writeln!(f, "  Statements serialized: {}", self.statements)?;
        writeln!(f, "  Candidates: {}", self.candidates())?;
        writeln!(f, "  Accepted: {}", self.accepted())?;
        writeln!(f, "  Dropped: {}", self.dropped())?;
        write!(f, "{}", self.assembly)
    }
}

/// Execute one full graph run.
pub fn run(config: &PipelineConfig) -> Result<PipelineReport> {
    let index = tables::load_index(&config.tables_dir)?.finalize();
    let gazetteer = match &config.gazetteer {
        Some(path) => Gazetteer::from_path(path)?,
        None => Gazetteer::empty(),
    };
    if gazetteer.skipped() > 0 {
        log::warn!("skipped {} malformed gazetteer line(s)", gazetteer.skipped());
    }
    let source = VernacularSource::from_path(&config.source)?;

    let mut resolver = GeoResolver::new(&gazetteer);
    let mut assembler = Assembler::with_policy(&index, config.policy);
    let mut graph = NameGraph::new();

    for name in source.names() {
        for record in assembler.assemble(name, &mut resolver) {
            graph.push_occurrence(&record);
        }
    }
    for record in assembler.sweep(&mut resolver) {
        graph.push_occurrence(&record);
    }

    fs::write(&config.output, graph.serialize(config.format)).map_err(|e| {
        Error::invalid_input(format!("Failed to write graph {:?}: {}", config.output, e))
    })?;

    Ok(PipelineReport {
        source_lines: source.len(),
        source_skipped: source.skipped,
        assembly: assembler.finish(),
        statements: graph.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::CrossIndex;
    use crate::name::ScientificName;

    fn write_fixtures(dir: &std::path::Path) {
        let lantana = ScientificName::from_latin("Viburnum lantana").unwrap();
        let mut index = CrossIndex::new();
        index.add_book_name(&lantana, "Schneeball");
        index.add_vernacular(&lantana, "Schnääball");
        index.add_canton("Schnääball", "Bern");
        index.add_locality("Schnääball", "Wädenswil");
        tables::save_latin_tables(dir, &index).unwrap();
        tables::save_geo_tables(dir, &index).unwrap();

        fs::write(dir.join("gazetteer.tsv"), "Wädenswil\tBern\n").unwrap();
        fs::write(
            dir.join("source.tsv"),
            "BOSSHARD\tuses_vernacular_name\tSchnääball\n",
        )
        .unwrap();
    }

    #[test]
    fn run_produces_a_graph_and_report() {
        let dir = tempfile::tempdir().unwrap();
        write_fixtures(dir.path());

        let config = PipelineConfig {
            tables_dir: dir.path().to_path_buf(),
            source: dir.path().join("source.tsv"),
            gazetteer: Some(dir.path().join("gazetteer.tsv")),
            output: dir.path().join("out.ttl"),
            format: GraphFormat::Turtle,
            policy: UnlinkedPolicy::Skip,
        };
        let report = run(&config).unwrap();

        // One source record plus the swept "Schneeball" book name.
        assert_eq!(report.source_lines, 1);
        assert_eq!(report.accepted(), 2);
        assert_eq!(report.assembly.swept, 1);
        // Eight statements for the full record, six for the swept one.
        assert_eq!(report.statements, 14);

        let turtle = fs::read_to_string(dir.path().join("out.ttl")).unwrap();
        assert!(turtle.contains("<http://vernacular/1> rdf:type :NameOccurrence"));
        assert!(turtle.contains("<http://vernacular/2> rdf:type :NameOccurrence"));
        assert!(turtle.contains(":areaFine \"Wädenswil\""));
    }

    #[test]
    fn missing_tables_abort_with_the_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig {
            tables_dir: dir.path().to_path_buf(),
            source: dir.path().join("source.tsv"),
            gazetteer: None,
            output: dir.path().join("out.ttl"),
            format: GraphFormat::Turtle,
            policy: UnlinkedPolicy::Skip,
        };
        let err = run(&config).unwrap_err();
        assert!(err.to_string().contains(tables::LAT_BOOK_FILE));
    }
}
