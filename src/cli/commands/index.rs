//! Index command - build scientific-name tables from the Latin corpus

use std::fs;
use std::path::PathBuf;

use clap::Parser;

use crate::cli::output::log_info;
use crate::ingest::tables;
use crate::latin::LatinScan;

/// Parse the Latin corpus extract into the lat-book / lat-vern / vern-lat
/// tables
#[derive(Parser, Debug)]
pub struct IndexArgs {
    /// Cleaned Latin corpus extract (headings and vernacular lines)
    pub input: PathBuf,

    /// Directory for the table files
    #[arg(short, long, default_value = "triples")]
    pub out_dir: PathBuf,

    /// Suppress the scan report
    #[arg(short, long)]
    pub quiet: bool,
}

/// Run the index stage.
pub fn run(args: IndexArgs) -> Result<(), String> {
    let content = fs::read_to_string(&args.input)
        .map_err(|e| format!("Failed to read {}: {}", args.input.display(), e))?;

    let mut scan = LatinScan::new();
    for line in content.lines() {
        scan.observe(line);
    }
    let mut outcome = scan.finish();
    outcome.index.lat_book.dedup();
    outcome.index.lat_vern.dedup();
    outcome.index.vern_lat.dedup();

    fs::create_dir_all(&args.out_dir)
        .map_err(|e| format!("Failed to create {}: {}", args.out_dir.display(), e))?;
    tables::save_latin_tables(&args.out_dir, &outcome.index).map_err(|e| e.to_string())?;

    log_info(&outcome.stats.to_string(), args.quiet);
    log_info(
        &format!(
            "Tables ({}):\n  {}: {} key(s)\n  {}: {} key(s)\n  {}: {} key(s)",
            args.out_dir.display(),
            tables::LAT_BOOK_FILE,
            outcome.index.lat_book.len(),
            tables::LAT_VERN_FILE,
            outcome.index.lat_vern.len(),
            tables::VERN_LAT_FILE,
            outcome.index.vern_lat.len(),
        ),
        args.quiet,
    );
    Ok(())
}
