use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "voter-merge",
    version,
    about = "Structure, merge and summarize OCR-extracted voter roll tables"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Merge(MergeArgs),
    Stats(StatsArgs),
}

#[derive(Args, Debug, Clone)]
pub struct MergeArgs {
    /// Source CSV files, processed in the given order.
    pub sources: Vec<PathBuf>,

    #[arg(long, conflicts_with = "sources")]
    pub sources_manifest: Option<PathBuf>,

    #[arg(long, default_value = "voters_data_merged_new.csv")]
    pub output: PathBuf,

    #[arg(long)]
    pub report_path: Option<PathBuf>,

    /// Do not collapse rows with an empty EPIC number into one record.
    #[arg(long, default_value_t = false)]
    pub keep_blank_identifiers: bool,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct StatsArgs {
    /// A merged CSV previously written by `merge`.
    pub merged_path: PathBuf,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}
