use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::enricher::DuplicateKeyPolicy;
use crate::error::{DemandError, Result};
use crate::exporter::export_all;
use crate::fmt::amount;
use crate::models::{CellValue, DemandRecord, NamedExport, ProductLine};
use crate::pipeline::{process, Upload};
use crate::reports::{sample, summarize};
use crate::schema::OUTPUT_COLUMNS;
use crate::settings::load_settings;

fn read_bytes(path: &Path) -> Result<(String, Vec<u8>)> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    let bytes = std::fs::read(path).map_err(|e| DemandError::parse(&name, e))?;
    Ok((name, bytes))
}

fn cell_display(cell: &CellValue) -> String {
    match cell {
        CellValue::Blank => String::new(),
        CellValue::Text(s) => s.clone(),
        CellValue::Number(n) if n.fract() == 0.0 => format!("{n:.0}"),
        CellValue::Number(n) => n.to_string(),
        CellValue::Date(d) => d.format("%Y-%m-%d 00:00:00").to_string(),
    }
}

fn sample_table(rows: &[DemandRecord]) -> Table {
    let mut table = Table::new();
    table.set_header(OUTPUT_COLUMNS.to_vec());
    for row in sample(rows) {
        table.add_row(row.cells().iter().map(cell_display).collect::<Vec<_>>());
    }
    table
}

pub fn run(
    ledger: PathBuf,
    branch: PathBuf,
    mobile: PathBuf,
    date: NaiveDate,
    output_dir: Option<PathBuf>,
    duplicate_keys: Option<DuplicateKeyPolicy>,
) -> Result<()> {
    let settings = load_settings();
    let policy = duplicate_keys.unwrap_or(settings.duplicate_keys);
    let dir = output_dir.unwrap_or_else(|| PathBuf::from(&settings.output_dir));

    let (ledger_name, ledger_bytes) = read_bytes(&ledger)?;
    let (branch_name, branch_bytes) = read_bytes(&branch)?;
    let (mobile_name, mobile_bytes) = read_bytes(&mobile)?;

    let extracts = process(
        Upload { name: &ledger_name, bytes: &ledger_bytes },
        Upload { name: &branch_name, bytes: &branch_bytes },
        Upload { name: &mobile_name, bytes: &mobile_bytes },
        date,
        policy,
    )?;
    let exports = export_all(&extracts)?;

    let summary = summarize(&extracts);
    let count = |line| summary.get(line).map(|l| l.records).unwrap_or(0);
    println!("{}", "Data Overview After Processing".bold());
    println!(
        "IGL Records: {}  |  TW Records: {}\n",
        count(ProductLine::Igl),
        count(ProductLine::Tw)
    );
    for line in ProductLine::ALL {
        println!("{} Sample Data:", line.label().bold());
        println!("{}\n", sample_table(extracts.get(line)));
    }

    let mut totals = Table::new();
    totals.set_header(vec!["Product", "Total Due"]);
    for line in &summary.lines {
        totals.add_row(vec![
            Cell::new(line.line.product_id()),
            Cell::new(amount(line.total_due)),
        ]);
    }
    println!("{}\n{totals}\n", "Total Due by Product".bold());

    for path in write_exports(&dir, &exports)? {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

fn staging_path(dir: &Path, file_name: &str) -> PathBuf {
    dir.join(format!(".{file_name}.partial"))
}

/// Write every export or none of them. Files are staged under a hidden name
/// in `dir` and only renamed into place once all of them are on disk.
fn write_exports(dir: &Path, exports: &[NamedExport]) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let mut staged = Vec::with_capacity(exports.len());
    for export in exports {
        let tmp = staging_path(dir, export.file_name);
        if let Err(e) = std::fs::write(&tmp, &export.bytes) {
            let _ = std::fs::remove_file(&tmp);
            for (tmp, _) in &staged {
                let _ = std::fs::remove_file(tmp);
            }
            return Err(e.into());
        }
        staged.push((tmp, dir.join(export.file_name)));
    }

    let mut written: Vec<PathBuf> = Vec::with_capacity(staged.len());
    for (i, (tmp, path)) in staged.iter().enumerate() {
        if let Err(e) = std::fs::rename(tmp, path) {
            for done in &written {
                let _ = std::fs::remove_file(done);
            }
            for (rest, _) in &staged[i..] {
                let _ = std::fs::remove_file(rest);
            }
            return Err(e.into());
        }
        tracing::info!(path = %path.display(), "extract written");
        written.push(path.clone());
    }
    Ok(written)
}
