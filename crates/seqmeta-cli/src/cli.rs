//! CLI argument definitions for the sequencing metadata tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "seqmeta",
    version,
    about = "Sequencing metadata - convert LIMS exports to archive submissions",
    long_about = "Convert laboratory sample metadata to the neutral model and export\n\
                  sequence read archive submissions (XML, JSON, manifest and TSV)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract neutral metadata from a lab export.
    #[command(subcommand)]
    Extract(ExtractCommand),

    /// Export archive submissions, one set of files per project.
    Export(ExportArgs),

    /// Print a classification taxonomy as a tree.
    Taxonomy(TaxonomyArgs),

    /// Print the mapping table from classified libraries to archive descriptors.
    Mapping,
}

#[derive(Subcommand)]
pub enum ExtractCommand {
    /// Convert a LIMS container export to a neutral experiment set.
    Lims(ExtractLimsArgs),
}

#[derive(Args)]
pub struct ExtractLimsArgs {
    /// LIMS container JSON (`{"result": {"name": .., "samples": [..]}}`).
    #[arg(value_name = "LIMS_JSON")]
    pub input: PathBuf,

    /// Directory for the `<name>.ngi.json` output (default: current directory).
    #[arg(long = "outdir", value_name = "DIR")]
    pub outdir: Option<PathBuf>,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Neutral flowcell JSON.
    #[arg(value_name = "FLOWCELL_JSON")]
    pub flowcell: PathBuf,

    /// Neutral experiment set JSON, as written by `extract lims`.
    #[arg(value_name = "EXPERIMENTS_JSON")]
    pub experiments: PathBuf,

    /// Output directory for generated files (default: current directory).
    #[arg(long = "outdir", value_name = "DIR")]
    pub outdir: Option<PathBuf>,

    /// Formats to write (default: all).
    #[arg(long = "format", value_enum, value_delimiter = ',')]
    pub formats: Vec<ExportFormatArg>,

    /// Replace the run center of every run.
    #[arg(long = "run-center", value_name = "NAME")]
    pub run_center: Option<String>,

    /// List the projects and planned outputs without writing files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct TaxonomyArgs {
    /// Taxonomy to print.
    #[arg(value_enum)]
    pub taxonomy: TaxonomyArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportFormatArg {
    Xml,
    Json,
    Manifest,
    Tsv,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TaxonomyArg {
    Application,
    Source,
    LibraryKit,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
