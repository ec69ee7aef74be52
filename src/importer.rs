use std::io::Cursor;

use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};

use crate::error::{DemandError, Result};
use crate::models::{BranchMeta, LedgerRecord, MobileContact};
use crate::normalize::normalize_branch_id;
use crate::schema;

// ---------------------------------------------------------------------------
// Raw tables
// ---------------------------------------------------------------------------

/// Untyped grid parsed from an input file. Header names are trimmed and every
/// row has exactly `headers.len()` cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Names from `required` that are not headers of this table, in order.
    pub fn missing_columns(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|c| self.column_index(c).is_none())
            .map(|c| c.to_string())
            .collect()
    }

    fn require(&self, table: &str, required: &[&str]) -> Result<Vec<usize>> {
        let missing = self.missing_columns(required);
        if !missing.is_empty() {
            return Err(DemandError::Schema {
                table: table.to_string(),
                missing,
            });
        }
        Ok(required
            .iter()
            .filter_map(|c| self.column_index(c))
            .collect())
    }

    /// Index of the first of `candidates` present, used for columns the
    /// pipeline renames to a common key.
    fn first_present(&self, candidates: &[&str]) -> Option<usize> {
        candidates.iter().find_map(|c| self.column_index(c))
    }
}

/// Check the ledger carries every required column. Nothing downstream runs
/// when this fails.
pub fn validate_ledger_columns(table: &RawTable) -> Result<()> {
    table
        .require(InputKind::Ledger.name(), schema::REQUIRED_LEDGER_COLUMNS)
        .map(|_| ())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// ISO-8859-1 maps every byte to the code point of the same value.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

pub fn parse_amount(raw: &str) -> f64 {
    let s = raw.replace(',', "").replace('"', "").replace('$', "");
    let s = s.trim();
    let value = if let Some(inner) = s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        -inner.trim().parse::<f64>().unwrap_or(0.0)
    } else {
        s.parse().unwrap_or(0.0)
    };
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

/// Cell values that spreadsheet exports use to mean "no value".
const NA_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// True for blank cells and the usual missing-value markers. Matching is
/// case-sensitive, so `Na` or `Null` are kept as text.
pub fn is_na_token(raw: &str) -> bool {
    let s = raw.trim();
    s.is_empty() || NA_TOKENS.contains(&s)
}

/// Parse a mobile number cell. Blank and missing-value markers are null;
/// floats are accepted only when they carry no fractional part.
pub fn parse_mobile(raw: &str) -> std::result::Result<Option<i64>, String> {
    if is_na_token(raw) {
        return Ok(None);
    }
    let s = raw.trim();
    if let Ok(n) = s.parse::<i64>() {
        return Ok(Some(n));
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            Ok(Some(f as i64))
        }
        _ => Err(format!("cannot read mobile number '{s}' as an integer")),
    }
}

fn none_if_blank(raw: &str) -> Option<String> {
    if is_na_token(raw) {
        None
    } else {
        Some(raw.trim().to_string())
    }
}

/// Render a spreadsheet cell as text. Whole floats drop their fractional part
/// so numeric branch codes read the same as in a CSV.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            (*f as i64).to_string()
        }
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => (if *b { "True" } else { "False" }).to_string(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Input kinds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputKind {
    Ledger,
    Branch,
    Mobile,
}

impl InputKind {
    pub const ALL: [InputKind; 3] = [InputKind::Ledger, InputKind::Branch, InputKind::Mobile];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ledger => "Daily Collection",
            Self::Branch => "Branch",
            Self::Mobile => "Mobile",
        }
    }

    pub fn read(&self, file: &str, bytes: &[u8]) -> Result<RawTable> {
        match self {
            Self::Ledger | Self::Mobile => read_csv_table(file, bytes),
            Self::Branch => read_xlsx_table(file, bytes),
        }
    }
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// Read Latin-1, comma-separated text whose first record is the header.
/// Short rows are padded with blanks; rows longer than the header are an error.
pub fn read_csv_table(file: &str, bytes: &[u8]) -> Result<RawTable> {
    let text = decode_latin1(bytes);
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| DemandError::parse(file, e))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(DemandError::parse(file, "no columns to parse"));
    }

    let mut rows = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| DemandError::parse(file, e))?;
        if record.len() > headers.len() {
            return Err(DemandError::parse(
                file,
                format!(
                    "expected {} fields in line {}, saw {}",
                    headers.len(),
                    i + 2,
                    record.len()
                ),
            ));
        }
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        let mut row: Vec<String> = record.iter().map(|f| f.to_string()).collect();
        row.resize(headers.len(), String::new());
        rows.push(row);
    }
    Ok(RawTable { headers, rows })
}

// ---------------------------------------------------------------------------
// XLSX reader
// ---------------------------------------------------------------------------

/// Read the first worksheet, treating its first row as the header.
pub fn read_xlsx_table(file: &str, bytes: &[u8]) -> Result<RawTable> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| DemandError::parse(file, format!("failed to open XLSX: {e}")))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DemandError::parse(file, "workbook has no worksheets"))?
        .map_err(|e| DemandError::parse(file, e))?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Err(DemandError::parse(file, "no columns to parse"));
    };
    let headers: Vec<String> = header_row
        .iter()
        .map(|c| cell_text(c).trim().to_string())
        .collect();

    let rows = rows
        .filter(|row| row.iter().any(|c| !matches!(c, Data::Empty)))
        .map(|row| row.iter().map(cell_text).collect::<Vec<String>>())
        .collect();
    Ok(RawTable { headers, rows })
}

// ---------------------------------------------------------------------------
// Typed rows
// ---------------------------------------------------------------------------

pub fn ledger_records(table: &RawTable) -> Result<Vec<LedgerRecord>> {
    let idx = table.require(InputKind::Ledger.name(), schema::REQUIRED_LEDGER_COLUMNS)?;
    let (client, branch, branch_name, state, client_name, account, due) =
        (idx[0], idx[1], idx[2], idx[3], idx[4], idx[5], idx[6]);

    Ok(table
        .rows
        .iter()
        .map(|row| LedgerRecord {
            client_id: row[client].trim().to_string(),
            branch_id: normalize_branch_id(&row[branch]),
            branch_name: row[branch_name].clone(),
            state_name: row[state].clone(),
            client_name: row[client_name].clone(),
            account_id: row[account].clone(),
            total_due: parse_amount(&row[due]),
        })
        .collect())
}

pub fn branch_records(table: &RawTable) -> Result<Vec<BranchMeta>> {
    let (source_key, common_key) = schema::BRANCH_KEY_RENAME;
    let key = table.first_present(&[source_key, common_key]);
    let lang = table.column_index(schema::LANG);
    let (Some(key), Some(lang)) = (key, lang) else {
        let mut missing = Vec::new();
        if key.is_none() {
            missing.push(source_key.to_string());
        }
        if lang.is_none() {
            missing.push(schema::LANG.to_string());
        }
        return Err(DemandError::Schema {
            table: InputKind::Branch.name().to_string(),
            missing,
        });
    };

    Ok(table
        .rows
        .iter()
        .map(|row| BranchMeta {
            branch_id: normalize_branch_id(&row[key]),
            lang: none_if_blank(&row[lang]),
        })
        .collect())
}

pub fn mobile_records(file: &str, table: &RawTable) -> Result<Vec<MobileContact>> {
    let (source_key, common_key) = schema::MOBILE_KEY_RENAME;
    let key = table.first_present(&[source_key, common_key]);
    let mobile = table.column_index(schema::MOBILE);
    let (Some(key), Some(mobile)) = (key, mobile) else {
        let mut missing = Vec::new();
        if key.is_none() {
            missing.push(source_key.to_string());
        }
        if mobile.is_none() {
            missing.push(schema::MOBILE.to_string());
        }
        return Err(DemandError::Schema {
            table: InputKind::Mobile.name().to_string(),
            missing,
        });
    };

    table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let number = parse_mobile(&row[mobile])
                .map_err(|e| DemandError::parse(file, format!("row {}: {e}", i + 1)))?;
            Ok(MobileContact {
                client_id: row[key].trim().to_string(),
                mobile: number,
            })
        })
        .collect()
}
