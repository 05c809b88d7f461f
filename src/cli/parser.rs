//! CLI argument parsing and structure definitions

use clap::{Parser, Subcommand, ValueEnum};

use crate::graph::GraphFormat;

use super::commands;

/// Vernacular plant-name extraction and graph assembly CLI
#[derive(Parser)]
#[command(name = "vern")]
#[command(
    author,
    version,
    about = "Vernacular plant-name extraction and graph assembly",
    long_about = r#"
vern - a vernacular plant-name pipeline

STAGES:
  harvest   Scan the geographic corpus extract for (canton, name) facts
  index     Parse the Latin corpus extract into scientific-name tables
  author    Tag a cleaned name list with its source author
  graph     Assemble name occurrences and serialize the RDF graph

DATA FLOW:
  corpus extracts -> harvest/index -> mapping tables
  name list       -> author        -> vernacular source
  tables + source -> graph         -> Turtle / N-Triples

EXAMPLES:
  vern harvest corpus/geo.txt --geo-stoplist stop/swisstopo.txt
  vern index corpus/latin.txt -o triples
  vern author names.txt --author Bosshard_Hans_Heinrich -o source.tsv
  vern graph -s source.tsv -g gazetteer.tsv -o graph.ttl
  vern info
"#
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Pipeline stages and utility subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Extract geographic name facts from the geo corpus
    #[command(visible_alias = "h")]
    Harvest(commands::HarvestArgs),

    /// Build scientific-name tables from the Latin corpus
    #[command(visible_alias = "ix")]
    Index(commands::IndexArgs),

    /// Tag a cleaned name list with its source author
    #[command(visible_alias = "a")]
    Author(commands::AuthorArgs),

    /// Assemble name occurrences and serialize the graph
    #[command(visible_alias = "g")]
    Graph(commands::GraphArgs),

    /// Show pipeline, table, and vocabulary information
    #[command(visible_alias = "i")]
    Info,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Graph serialization format selection
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum FormatChoice {
    /// Turtle with prefixes, statements grouped by subject (default)
    #[default]
    Turtle,
    /// N-Triples, one absolute-IRI statement per line
    #[value(alias = "nt")]
    Ntriples,
}

impl FormatChoice {
    /// The corresponding serializer format.
    pub fn to_format(self) -> GraphFormat {
        match self {
            Self::Turtle => GraphFormat::Turtle,
            Self::Ntriples => GraphFormat::NTriples,
        }
    }

    /// Stable display name used in reports.
    pub fn name(self) -> &'static str {
        match self {
            Self::Turtle => "turtle",
            Self::Ntriples => "ntriples",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn format_choice_maps_to_graph_format() {
        assert_eq!(FormatChoice::Turtle.to_format(), GraphFormat::Turtle);
        assert_eq!(FormatChoice::Ntriples.to_format(), GraphFormat::NTriples);
    }
}
