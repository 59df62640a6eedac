//! Command-line interface for cs-doc-pipeline.

use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::parser::code_parser::CodeParser;
use crate::pipeline::discover_sources;

/// Extract C# functions with their XML docs, summarize them with a
/// language model and publish one page per source file.
#[derive(Debug, Parser)]
#[command(name = "cs-doc-pipeline")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Parse and print the extracted elements as JSON, without summarizing
    #[arg(long)]
    pub parse_only: bool,

    /// Root directory scanned for sources
    #[arg(env = "SOLUTION_DIR")]
    pub solution_dir: Option<PathBuf>,
}

/// Parse every source under `root` and write the elements as JSON.
///
/// The JSON for the readable files is always written; any file that could
/// not be read then turns the whole run into an error.
pub fn run_parse_only<W: Write>(root: &Path, extensions: &[String], out: &mut W) -> anyhow::Result<()> {
    let files = discover_sources(root, extensions)?;
    let parsed = CodeParser::new().parse_files(&files);

    serde_json::to_writer_pretty(&mut *out, &parsed.files)?;
    writeln!(out)?;

    if !parsed.failures.is_empty() {
        anyhow::bail!(
            "{} of {} files could not be parsed, see log for details",
            parsed.failures.len(),
            files.len()
        );
    }

    Ok(())
}
