use std::io::{Read, Write};

use mediaudit_core::{Bill, AMOUNT_COLUMN, ITEM_COLUMN};

use crate::table::{parse_cell_amount, ColumnIndex, RowCollector, TableError};

/// Load a comma-delimited bill with a header row containing `Item` and `Amount (₹)`.
///
/// Rows that cannot be projected onto those two columns are skipped.
pub fn load_csv<R: Read>(data: R) -> Result<Bill, TableError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let columns = ColumnIndex::locate(reader.headers()?.iter())?;
    let mut rows = RowCollector::default();

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!("Skipping unreadable CSV row: {e}");
                rows.skip();
                continue;
            }
        };
        rows.push(
            record.get(columns.item),
            record.get(columns.amount).and_then(parse_cell_amount),
        );
    }

    Ok(rows.finish("csv"))
}

/// Write the canonical two-column table.
pub fn write_bill_csv<W: Write>(bill: &Bill, out: W) -> Result<(), TableError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out);
    writer.write_record([ITEM_COLUMN, AMOUNT_COLUMN])?;
    for item in bill {
        writer.serialize(item)?;
    }
    writer.flush()?;
    Ok(())
}
