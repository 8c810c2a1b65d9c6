use std::str::FromStr;

use mediaudit_core::{Bill, LineItem, Rupees, AMOUNT_COLUMN, ITEM_COLUMN};
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] calamine::XlsxError),
    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),
    #[error("Workbook has no worksheets")]
    NoSheet,
}

/// Positions of the two canonical columns within a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ColumnIndex {
    pub item: usize,
    pub amount: usize,
}

impl ColumnIndex {
    pub fn locate<'a, I>(headers: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let headers: Vec<&str> = headers
            .into_iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim())
            .collect();
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| *h == name)
                .ok_or(TableError::MissingColumn(name))
        };
        Ok(ColumnIndex {
            item: find(ITEM_COLUMN)?,
            amount: find(AMOUNT_COLUMN)?,
        })
    }
}

/// Accumulates projected rows, silently skipping the unusable ones.
#[derive(Debug, Default)]
pub(crate) struct RowCollector {
    items: Vec<LineItem>,
    dropped: usize,
}

impl RowCollector {
    pub fn push(&mut self, item: Option<&str>, amount: Option<Decimal>) {
        let row = item
            .zip(amount)
            .and_then(|(item, amount)| LineItem::new(item, Rupees::new(amount).ok()?).ok());
        match row {
            Some(row) => self.items.push(row),
            None => self.dropped += 1,
        }
    }

    pub fn skip(&mut self) {
        self.dropped += 1;
    }

    pub fn finish(self, source: &str) -> Bill {
        tracing::debug!(
            source,
            kept = self.items.len(),
            dropped = self.dropped,
            "Projected tabular rows"
        );
        Bill::new(self.items)
    }
}

/// Parse a textual amount cell. No currency symbols or separators are accepted.
pub(crate) fn parse_cell_amount(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s).ok()
}
