use chrono::Datelike;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

use crate::error::Result;
use crate::models::{CellValue, DemandExtracts, DemandRecord, NamedExport, ProductLine};
use crate::schema::OUTPUT_COLUMNS;

const DATE_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Serialize one extract as a single-sheet workbook held in memory.
pub fn to_xlsx_bytes(records: &[DemandRecord]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format(DATE_FORMAT);
    let sheet = workbook.add_worksheet();

    for (col, name) in OUTPUT_COLUMNS.iter().enumerate() {
        sheet.write_string(0, col as u16, *name)?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = i as u32 + 1;
        for (col, cell) in record.cells().into_iter().enumerate() {
            let col = col as u16;
            match cell {
                CellValue::Blank => {}
                CellValue::Text(s) => {
                    sheet.write_string(row, col, s)?;
                }
                CellValue::Number(n) => {
                    sheet.write_number(row, col, n)?;
                }
                CellValue::Date(d) => {
                    let dt = ExcelDateTime::from_ymd(d.year() as u16, d.month() as u8, d.day() as u8)?;
                    sheet.write_datetime_with_format(row, col, &dt, &date_format)?;
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// Serialize both extracts. Either both buffers are returned or neither.
pub fn export_all(extracts: &DemandExtracts) -> Result<Vec<NamedExport>> {
    ProductLine::ALL
        .iter()
        .map(|line| {
            Ok(NamedExport {
                file_name: line.file_name(),
                bytes: to_xlsx_bytes(extracts.get(*line))?,
            })
        })
        .collect()
}
