use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::application::data::LogLevel;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Rewrites literal text across a web project")]
pub struct Cli {
    #[clap(long, short, default_value = "warn", value_enum, global = true)]
    pub log_level: LogLevel,

    /// The root directory of the project
    #[clap(long, short, default_value = ".", global = true)]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Replace a literal in every matching file under the configured roots
    Bulk(BulkArgs),
    /// Replace the text between two markers in a single file
    Splice(SpliceArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct BulkArgs {
    /// Literal to search for
    #[clap(long)]
    pub from: Option<String>,
    /// Literal to substitute in
    #[clap(long)]
    pub to: Option<String>,
    /// Directory to walk recursively; repeat for several
    #[clap(long = "dir", value_name = "DIR")]
    pub roots: Vec<PathBuf>,
    /// File to process regardless of its extension; repeat for several
    #[clap(long = "file", value_name = "FILE")]
    pub files: Vec<PathBuf>,
    /// File name suffix eligible for rewriting, e.g. `.tsx`; repeat for several
    #[clap(long = "ext", value_name = "SUFFIX")]
    pub extensions: Vec<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct SpliceArgs {
    /// File to splice into
    #[clap(long)]
    pub file: Option<PathBuf>,
    /// Marker opening the replaced span
    #[clap(long)]
    pub start: Option<String>,
    /// Marker closing the replaced span; it is kept in the output
    #[clap(long)]
    pub end: Option<String>,
    /// File holding the replacement text
    #[clap(long = "with", value_name = "FILE")]
    pub replacement_file: Option<PathBuf>,
    /// Only report where the markers are, without writing
    #[clap(long)]
    pub locate_only: bool,
}
