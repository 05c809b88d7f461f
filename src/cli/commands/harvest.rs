//! Harvest command - extract geographic name facts from the geo corpus

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::classify::GeoScan;
use crate::cli::output::log_info;
use crate::index::CrossIndex;
use crate::ingest::source::USES_VERNACULAR_NAME;
use crate::ingest::tables;
use crate::stoplist::Stoplist;

/// Default file name for the harvested triples TSV.
const TRIPLES_FILE: &str = "geo-vern_triples.tsv";

/// Scan the geographic corpus extract for (canton, name, locality) facts
#[derive(Parser, Debug)]
pub struct HarvestArgs {
    /// Cleaned geo corpus extract, one line per entry
    pub input: PathBuf,

    /// Directory for the vern-canton / vern-loc tables
    #[arg(short, long, default_value = "triples")]
    pub out_dir: PathBuf,

    /// Harvested triples TSV (defaults to <OUT_DIR>/geo-vern_triples.tsv)
    #[arg(long)]
    pub triples: Option<PathBuf>,

    /// Stoplist of geographic terms to drop
    #[arg(long)]
    pub geo_stoplist: Option<PathBuf>,

    /// Stoplist of Latin genus terms to drop
    #[arg(long)]
    pub latin_stoplist: Option<PathBuf>,

    /// Suppress the scan report
    #[arg(short, long)]
    pub quiet: bool,
}

/// Run the harvest stage.
pub fn run(args: HarvestArgs) -> Result<(), String> {
    let geo_stop = load_stoplist(args.geo_stoplist.as_deref())?;
    let latin_stop = load_stoplist(args.latin_stoplist.as_deref())?;

    let content = fs::read_to_string(&args.input)
        .map_err(|e| format!("Failed to read {}: {}", args.input.display(), e))?;

    let mut scan = GeoScan::new(geo_stop, latin_stop);
    for line in content.lines() {
        scan.observe(line);
    }
    let outcome = scan.finish();

    fs::create_dir_all(&args.out_dir)
        .map_err(|e| format!("Failed to create {}: {}", args.out_dir.display(), e))?;

    // Tables store the bare canton unit; the TSV keeps the full header form.
    let mut index = CrossIndex::new();
    for record in &outcome.records {
        index.add_canton(&record.name, record.canton_unit());
        if let Some(locality) = &record.locality {
            index.add_locality(&record.name, locality);
        }
    }
    index.vern_canton.dedup();
    index.vern_loc.dedup();
    tables::save_geo_tables(&args.out_dir, &index).map_err(|e| e.to_string())?;

    let triples_path = args
        .triples
        .clone()
        .unwrap_or_else(|| args.out_dir.join(TRIPLES_FILE));
    let unique: BTreeSet<String> = outcome
        .records
        .iter()
        .map(|r| format!("{}\t{}\t{}", r.canton, USES_VERNACULAR_NAME, r.name))
        .collect();
    let mut tsv = String::new();
    for line in &unique {
        tsv.push_str(line);
        tsv.push('\n');
    }
    fs::write(&triples_path, tsv)
        .map_err(|e| format!("Failed to write to {}: {}", triples_path.display(), e))?;

    log_info(&outcome.stats.to_string(), args.quiet);
    log_info(
        &format!(
            "wrote {} unique triple(s) to {}",
            unique.len(),
            triples_path.display()
        ),
        args.quiet,
    );
    Ok(())
}

fn load_stoplist(path: Option<&Path>) -> Result<Stoplist, String> {
    match path {
        Some(path) => Stoplist::from_path(path).map_err(|e| e.to_string()),
        None => Ok(Stoplist::empty()),
    }
}
