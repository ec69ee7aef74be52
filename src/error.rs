use thiserror::Error;

#[derive(Error, Debug)]
pub enum DemandError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Error reading {file}: {reason}")]
    Parse { file: String, reason: String },

    #[error("Missing columns in {table}: {}", .missing.join(", "))]
    Schema { table: String, missing: Vec<String> },

    #[error("Duplicate keys in {table}: {}", .keys.join(", "))]
    DuplicateKey { table: String, keys: Vec<String> },

    #[error("Settings error: {0}")]
    Settings(String),
}

impl DemandError {
    pub fn parse(file: &str, reason: impl ToString) -> Self {
        Self::Parse {
            file: file.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DemandError>;
