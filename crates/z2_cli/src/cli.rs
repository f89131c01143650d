//! Argument definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_DB_FILE: &str = "z2.db";

#[derive(Debug, Parser)]
#[command(name = "z2")]
#[command(about = "z2 is a simple note-taking system")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Database file
    #[arg(long, global = true, env = "Z2_DB_FILE", default_value = DEFAULT_DB_FILE)]
    pub db: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "Z2_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Write rolling log files into this directory instead of stderr
    #[arg(long, global = true, env = "Z2_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new note
    Create(CreateArgs),
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Title of the note
    #[arg(short, long, default_value = "")]
    pub title: String,

    /// Summary of the note
    #[arg(short, long, default_value = "")]
    pub summary: String,

    /// Tags for the note (comma-separated or repeated)
    #[arg(short = 'g', long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Path to the Markdown file for the note body
    #[arg(short, long)]
    pub body_file: PathBuf,
}
