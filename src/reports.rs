use crate::models::{DemandExtracts, DemandRecord, ProductLine};

pub const SAMPLE_ROWS: usize = 10;

pub struct LineSummary {
    pub line: ProductLine,
    pub records: usize,
    pub total_due: f64,
}

pub struct RunSummary {
    pub lines: Vec<LineSummary>,
}

impl RunSummary {
    pub fn get(&self, line: ProductLine) -> Option<&LineSummary> {
        self.lines.iter().find(|l| l.line == line)
    }
}

/// Record counts and total due per product line, computed from the final tables.
pub fn summarize(extracts: &DemandExtracts) -> RunSummary {
    let lines = ProductLine::ALL
        .iter()
        .map(|&line| {
            let rows = extracts.get(line);
            LineSummary {
                line,
                records: rows.len(),
                total_due: rows.iter().map(|r| r.total_due).sum(),
            }
        })
        .collect();
    RunSummary { lines }
}

pub fn sample(rows: &[DemandRecord]) -> &[DemandRecord] {
    &rows[..rows.len().min(SAMPLE_ROWS)]
}
