mod aggregator;
mod classifier;
mod cli;
mod enricher;
mod error;
mod exporter;
mod fmt;
mod importer;
mod models;
mod normalize;
mod pipeline;
mod reports;
mod schema;
mod settings;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands};

/// Log level comes from DEMAND_EXTRACT_LOG, defaulting to warnings only.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("DEMAND_EXTRACT_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init {
            output_dir,
            duplicate_keys,
            preview_rows,
        } => cli::init::run(output_dir, duplicate_keys, preview_rows),
        Commands::Preview {
            ledger,
            branch,
            mobile,
        } => cli::preview::run(ledger, branch, mobile),
        Commands::Run {
            ledger,
            branch,
            mobile,
            date,
            output_dir,
            duplicate_keys,
        } => cli::run::run(ledger, branch, mobile, date, output_dir, duplicate_keys),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
