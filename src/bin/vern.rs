//! vern - Vernacular plant-name extraction CLI
//!
//! A pipeline for pulling vernacular (folk) plant names out of cleaned OCR
//! corpus extracts, cross-referencing them with scientific names and
//! geography, and serializing the result as an RDF graph.
//!
//! # Pipeline
//!
//! ```text
//! geo corpus   --harvest-->  vern-canton / vern-loc tables
//! Latin corpus --index---->  lat-book / lat-vern / vern-lat tables
//! name list    --author--->  vernacular source TSV
//! tables + source + gazetteer --graph--> Turtle / N-Triples
//! ```
//!
//! # Usage
//!
//! ```bash
//! # Harvest canton-attributed names
//! vern harvest corpus/geo.txt --geo-stoplist stop/swisstopo.txt
//!
//! # Build the scientific-name tables
//! vern index corpus/latin.txt -o triples
//!
//! # Tag the cleaned name list with its author
//! vern author names.txt --author Bosshard_Hans_Heinrich -o source.tsv
//!
//! # Assemble and serialize the graph
//! vern graph -s source.tsv -g gazetteer.tsv -o graph.ttl
//!
//! # Show pipeline and vocabulary info
//! vern info
//! ```

use std::io;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;

use vern::cli::commands::{author, graph, harvest, index, info};
use vern::cli::output::color;
use vern::cli::parser::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result: Result<(), String> = match cli.command {
        Commands::Harvest(args) => harvest::run(args),
        Commands::Index(args) => index::run(args),
        Commands::Author(args) => author::run(args),
        Commands::Graph(args) => graph::run(args),
        Commands::Info => info::run(),
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "vern", &mut io::stdout());
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", color("31", "error:"), e);
            ExitCode::FAILURE
        }
    }
}
