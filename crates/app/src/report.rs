use mediaudit_audit::{Alert, AuditResult};
use mediaudit_core::{Bill, Rupees};
use mediaudit_import::{write_bill_csv, InputFormat};
use serde::{Deserialize, Serialize};

use crate::error::AuditError;

/// What the presentation layer receives for one audit request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReport {
    /// Uploaded filename, or `None` for the built-in sample.
    pub source: Option<String>,
    pub format: Option<InputFormat>,
    pub bill: Bill,
    pub total: Rupees,
    pub alerts: Vec<Alert>,
    /// Extraction found no line items; the audit still ran.
    pub extraction_empty: bool,
}

impl AuditReport {
    pub fn new(
        source: Option<String>,
        format: Option<InputFormat>,
        bill: Bill,
        result: AuditResult,
    ) -> Self {
        Self {
            source,
            format,
            extraction_empty: bill.is_empty(),
            bill,
            total: result.total,
            alerts: result.alerts,
        }
    }

    pub fn to_json(&self) -> Result<String, AuditError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The extracted bill as a two-column `Item,Amount (₹)` table.
    pub fn bill_csv(&self) -> Result<String, AuditError> {
        let mut out = Vec::new();
        write_bill_csv(&self.bill, &mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}
