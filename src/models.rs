use chrono::NaiveDate;

use crate::schema;

/// One row of the daily collection ledger, restricted to the required columns.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRecord {
    pub client_id: String,
    pub branch_id: String,
    pub branch_name: String,
    pub state_name: String,
    pub client_name: String,
    pub account_id: String,
    pub total_due: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BranchMeta {
    pub branch_id: String,
    pub lang: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MobileContact {
    pub client_id: String,
    pub mobile: Option<i64>,
}

/// First ledger row seen for a client, carrying the summed due of every row
/// the client has in its product line.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientTotal {
    pub record: LedgerRecord,
    pub total_due: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRow {
    pub total: ClientTotal,
    pub lang: Option<String>,
    pub mobile: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductLine {
    Igl,
    Tw,
}

impl ProductLine {
    pub const ALL: [ProductLine; 2] = [ProductLine::Igl, ProductLine::Tw];

    /// Value published in the ProductID column.
    pub fn product_id(&self) -> &'static str {
        match self {
            Self::Igl => "IGL",
            Self::Tw => "TWL",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Igl => "IGL.xlsx",
            Self::Tw => "TW.xlsx",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Igl => "IGL",
            Self::Tw => "TW",
        }
    }
}

/// One output row of a demand extract. Field order matches
/// [`schema::OUTPUT_COLUMNS`].
#[derive(Debug, Clone, PartialEq)]
pub struct DemandRecord {
    pub branch_id: String,
    pub branch_name: String,
    pub state_name: String,
    pub language: Option<String>,
    pub demand_date: NaiveDate,
    pub account_id: Option<String>,
    pub mobile: Option<i64>,
    pub mobile1: String,
    pub mobile2: String,
    pub total_due: f64,
    pub tag5: String,
    pub product_id: String,
    pub template_id: String,
}

/// A single spreadsheet cell as the exporter writes it.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Blank,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl DemandRecord {
    /// Cells in output column order.
    pub fn cells(&self) -> [CellValue; schema::OUTPUT_WIDTH] {
        let text_or_blank = |v: &Option<String>| match v {
            Some(s) => CellValue::Text(s.clone()),
            None => CellValue::Blank,
        };
        // integer client ids are published as numbers
        let tag5 = match self.tag5.parse::<i64>() {
            Ok(n) => CellValue::Number(n as f64),
            Err(_) => CellValue::Text(self.tag5.clone()),
        };
        [
            CellValue::Text(self.branch_id.clone()),
            CellValue::Text(self.branch_name.clone()),
            CellValue::Text(self.state_name.clone()),
            text_or_blank(&self.language),
            CellValue::Date(self.demand_date),
            text_or_blank(&self.account_id),
            self.mobile
                .map(|m| CellValue::Number(m as f64))
                .unwrap_or(CellValue::Blank),
            CellValue::Text(self.mobile1.clone()),
            CellValue::Text(self.mobile2.clone()),
            CellValue::Number(self.total_due),
            tag5,
            CellValue::Text(self.product_id.clone()),
            CellValue::Text(self.template_id.clone()),
        ]
    }
}

/// Both extracts produced by one run.
#[derive(Debug, Clone, Default)]
pub struct DemandExtracts {
    pub igl: Vec<DemandRecord>,
    pub tw: Vec<DemandRecord>,
}

impl DemandExtracts {
    pub fn get(&self, line: ProductLine) -> &[DemandRecord] {
        match line {
            ProductLine::Igl => &self.igl,
            ProductLine::Tw => &self.tw,
        }
    }
}

/// Byte stream offered for download under a fixed file name.
#[derive(Debug, Clone)]
pub struct NamedExport {
    pub file_name: &'static str,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(tag5: &str) -> DemandRecord {
        DemandRecord {
            branch_id: "0007".to_string(),
            branch_name: "Main".to_string(),
            state_name: "KA".to_string(),
            language: None,
            demand_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            account_id: None,
            mobile: Some(9998887776),
            mobile1: "NULL".to_string(),
            mobile2: "NULL".to_string(),
            total_due: 800.0,
            tag5: tag5.to_string(),
            product_id: "TWL".to_string(),
            template_id: "Loan Installment-Good Standing-short".to_string(),
        }
    }

    #[test]
    fn test_cells_follow_output_order() {
        let cells = record("100").cells();
        assert_eq!(cells[0], CellValue::Text("0007".to_string()));
        assert_eq!(cells[3], CellValue::Blank);
        assert_eq!(cells[5], CellValue::Blank);
        assert_eq!(cells[6], CellValue::Number(9998887776.0));
        assert_eq!(cells[7], CellValue::Text("NULL".to_string()));
        assert_eq!(cells[9], CellValue::Number(800.0));
        assert_eq!(cells[10], CellValue::Number(100.0));
        assert_eq!(cells[11], CellValue::Text("TWL".to_string()));
    }

    #[test]
    fn test_non_numeric_tag5_stays_text() {
        let cells = record("C-100").cells();
        assert_eq!(cells[10], CellValue::Text("C-100".to_string()));
    }

    #[test]
    fn test_product_line_constants() {
        assert_eq!(ProductLine::Igl.product_id(), "IGL");
        assert_eq!(ProductLine::Tw.product_id(), "TWL");
        assert_eq!(ProductLine::Igl.file_name(), "IGL.xlsx");
        assert_eq!(ProductLine::Tw.file_name(), "TW.xlsx");
    }
}
