use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use mediaudit_core::Bill;
use rust_decimal::Decimal;

use crate::table::{parse_cell_amount, ColumnIndex, RowCollector, TableError};

/// Load the first worksheet of an `.xlsx` workbook. Row 1 is the header.
pub fn load_xlsx(bytes: &[u8]) -> Result<Bill, TableError> {
    let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(Cursor::new(bytes))?;
    let sheet = workbook.worksheet_range_at(0).ok_or(TableError::NoSheet)??;
    project_rows(sheet.rows())
}

fn project_rows<'a, I>(mut rows: I) -> Result<Bill, TableError>
where
    I: Iterator<Item = &'a [Data]>,
{
    let header: Vec<String> = rows
        .next()
        .unwrap_or_default()
        .iter()
        .map(|c| cell_as_string(c).unwrap_or_default())
        .collect();
    let columns = ColumnIndex::locate(header.iter().map(String::as_str))?;

    let mut collector = RowCollector::default();
    for row in rows {
        let item = row.get(columns.item).and_then(cell_as_string);
        collector.push(item.as_deref(), cell_as_decimal(row.get(columns.amount)));
    }
    Ok(collector.finish("xlsx"))
}

fn cell_as_string(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::Empty => None,
        _ => Some(format!("{cell}")),
    }
}

fn cell_as_decimal(cell: Option<&Data>) -> Option<Decimal> {
    match cell? {
        Data::Float(f) => f64_to_decimal(*f),
        Data::Int(i) => Some(Decimal::from(*i)),
        Data::String(s) => parse_cell_amount(s),
        _ => None,
    }
}

/// Go through the shortest round-trip string so 1200.1 stays 1200.1.
fn f64_to_decimal(f: f64) -> Option<Decimal> {
    if !f.is_finite() {
        return None;
    }
    format!("{f}")
        .parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::try_from(f).ok())
}
