pub mod csv;
pub mod format;
pub mod pdf;
pub mod table;
pub mod xlsx;

pub use crate::csv::{load_csv, write_bill_csv};
pub use format::{FormatError, InputFormat};
pub use pdf::{extract_bill as extract_pdf_bill, LopdfTextSource, PdfError, PdfPage, PdfTextSource};
pub use table::TableError;
pub use xlsx::load_xlsx;
