pub mod init;
pub mod preview;
pub mod run;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::enricher::DuplicateKeyPolicy;

#[derive(Parser)]
#[command(
    name = "demand-extract",
    about = "Build IGL and TW demand extracts from the daily collection ledger."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write default settings: output directory, duplicate-key policy, preview size.
    Init {
        /// Directory IGL.xlsx and TW.xlsx are written to
        #[arg(long = "output-dir")]
        output_dir: Option<String>,
        /// How joins treat repeated branch or client keys
        #[arg(long = "duplicate-keys", value_enum)]
        duplicate_keys: Option<DuplicateKeyPolicy>,
        /// Rows shown per file by `preview`
        #[arg(long = "preview-rows")]
        preview_rows: Option<usize>,
    },
    /// Show the first rows of each input file. Unreadable files are reported and skipped.
    Preview {
        /// Daily collection CSV
        #[arg(long)]
        ledger: Option<PathBuf>,
        /// Branch XLSX
        #[arg(long)]
        branch: Option<PathBuf>,
        /// Mobile contacts CSV
        #[arg(long)]
        mobile: Option<PathBuf>,
    },
    /// Build both extracts and write IGL.xlsx and TW.xlsx.
    Run {
        /// Daily collection CSV
        #[arg(long)]
        ledger: PathBuf,
        /// Branch XLSX
        #[arg(long)]
        branch: PathBuf,
        /// Mobile contacts CSV
        #[arg(long)]
        mobile: PathBuf,
        /// Demand date stamped on every row: YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
        /// Output directory (default: from settings)
        #[arg(long = "output-dir")]
        output_dir: Option<PathBuf>,
        /// How joins treat repeated branch or client keys (default: from settings)
        #[arg(long = "duplicate-keys", value_enum)]
        duplicate_keys: Option<DuplicateKeyPolicy>,
    },
}
