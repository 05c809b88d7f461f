//! Author command - tag a cleaned name list with its source author

use std::fs;
use std::path::PathBuf;

use clap::Parser;

use crate::cli::output::{log_info, write_output};
use crate::ingest::source::tag_author_lines;

/// Turn a one-name-per-line list into the tab-separated vernacular source
#[derive(Parser, Debug)]
pub struct AuthorArgs {
    /// Cleaned vernacular-name list, one name per line
    pub input: PathBuf,

    /// Author token to tag every line with (stored upper-cased)
    #[arg(short, long)]
    pub author: String,

    /// Output TSV; stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Suppress the line count report
    #[arg(short, long)]
    pub quiet: bool,
}

/// Run the author tagging stage.
pub fn run(args: AuthorArgs) -> Result<(), String> {
    let content = fs::read_to_string(&args.input)
        .map_err(|e| format!("Failed to read {}: {}", args.input.display(), e))?;

    let tagged = tag_author_lines(&args.author, content.lines());
    let mut out = tagged.join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    write_output(&out, args.output.as_deref())?;

    log_info(&format!("tagged {} line(s)", tagged.len()), args.quiet);
    Ok(())
}
