//! Graph command - assemble name occurrences and serialize the graph

use std::path::PathBuf;

use clap::Parser;

use crate::assemble::UnlinkedPolicy;
use crate::cli::output::log_info;
use crate::cli::parser::FormatChoice;
use crate::pipeline::{self, PipelineConfig};

/// Run the assembly stage over the saved tables and a vernacular source
#[derive(Parser, Debug)]
pub struct GraphArgs {
    /// Directory holding the five mapping-table files
    #[arg(short, long, default_value = "triples")]
    pub tables: PathBuf,

    /// Vernacular source TSV driving assembly
    #[arg(short, long)]
    pub source: PathBuf,

    /// Canonical gazetteer, one <locality>\t<canton> per line
    #[arg(short, long)]
    pub gazetteer: Option<PathBuf>,

    /// Output file for the serialized graph
    #[arg(short, long)]
    pub output: PathBuf,

    /// Serialization format
    #[arg(short, long, value_enum, default_value_t = FormatChoice::Turtle)]
    pub format: FormatChoice,

    /// Emit records for names with no linked scientific name
    #[arg(long)]
    pub emit_unlinked: bool,

    /// Suppress the run report
    #[arg(short, long)]
    pub quiet: bool,
}

/// Run the full graph stage.
pub fn run(args: GraphArgs) -> Result<(), String> {
    let policy = if args.emit_unlinked {
        UnlinkedPolicy::Emit
    } else {
        UnlinkedPolicy::Skip
    };
    let config = PipelineConfig {
        tables_dir: args.tables.clone(),
        source: args.source.clone(),
        gazetteer: args.gazetteer.clone(),
        output: args.output.clone(),
        format: args.format.to_format(),
        policy,
    };

    let report = pipeline::run(&config).map_err(|e| e.to_string())?;

    log_info(&report.to_string(), args.quiet);
    // The final counters stay visible even under --quiet.
    println!(
        "{} statement(s) ({}) -> {}",
        report.statements,
        args.format.name(),
        args.output.display()
    );
    Ok(())
}
