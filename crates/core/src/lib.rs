pub mod bill;
pub mod line;
pub mod money;

pub use bill::{Bill, BillError, LineItem, AMOUNT_COLUMN, ITEM_COLUMN};
pub use line::{parse_amount_token, parse_line, parse_lines, LineScan};
pub use money::Rupees;
