use std::path::{Path, PathBuf};

use colored::Colorize;
use comfy_table::Table;

use crate::error::{DemandError, Result};
use crate::importer::{InputKind, RawTable};
use crate::settings::load_settings;

fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse one input on its own. IO failures are reported like parse failures.
fn read_input(kind: InputKind, path: &Path) -> Result<RawTable> {
    let name = display_name(path);
    let bytes = std::fs::read(path).map_err(|e| DemandError::parse(&name, e))?;
    kind.read(&name, &bytes)
}

fn render(table: &RawTable, limit: usize) -> Table {
    let mut out = Table::new();
    out.set_header(table.headers.clone());
    for row in table.rows.iter().take(limit) {
        out.add_row(row.clone());
    }
    out
}

pub fn run(ledger: Option<PathBuf>, branch: Option<PathBuf>, mobile: Option<PathBuf>) -> Result<()> {
    let limit = load_settings().preview_rows;
    let inputs = InputKind::ALL.into_iter().zip([ledger, branch, mobile]);

    let mut shown = 0usize;
    for (kind, path) in inputs {
        let Some(path) = path else { continue };
        shown += 1;
        match read_input(kind, &path) {
            Ok(table) => {
                println!(
                    "{} ({}, {} rows)",
                    kind.name().bold(),
                    display_name(&path),
                    table.rows.len()
                );
                println!("{}\n", render(&table, limit));
            }
            Err(e) => {
                tracing::debug!(file = %path.display(), error = %e, "preview skipped");
                eprintln!("{}", e.to_string().red());
            }
        }
    }

    if shown == 0 {
        println!("No input files given. Pass --ledger, --branch and/or --mobile.");
    }
    Ok(())
}
