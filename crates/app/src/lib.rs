//! Itemized medical bill auditing.
//!
//! An [`Upload`] (CSV, XLSX, PDF or PNG/JPEG) is normalized into a [`Bill`] of
//! `(Item, Amount (₹))` rows and checked against fixed policy rules.
//! Unparseable rows and lines are dropped rather than reported.

pub mod auditor;
pub mod config;
pub mod error;
pub mod report;

pub use auditor::{audit_bill, Auditor, Upload};
pub use config::{AuditConfig, OcrConfig};
pub use error::AuditError;
pub use report::AuditReport;

pub use mediaudit_audit::{Alert, AlertCategory, AuditResult, ClaimContext};
pub use mediaudit_core::{parse_line, Bill, LineItem, Rupees};
pub use mediaudit_import::{InputFormat, PdfError, PdfPage, PdfTextSource};
pub use mediaudit_ocr::{MockRecognizer, OcrBackend, OcrFragment};
