use std::path::Path;

use mediaudit_audit::{audit, sample_bill, AuditResult, ClaimContext};
use mediaudit_core::Bill;
use mediaudit_import::{
    extract_pdf_bill, load_csv, load_xlsx, InputFormat, LopdfTextSource, PdfTextSource,
};
use mediaudit_ocr::{ImagePipeline, OcrBackend};

use crate::config::AuditConfig;
use crate::error::AuditError;
use crate::report::AuditReport;

/// Raw bytes plus the original filename, as handed over by the front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, AuditError> {
        let bytes = std::fs::read(path)?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self { filename, bytes })
    }
}

/// Audit a bill that has already been built. `None` is a caller bug.
pub fn audit_bill(bill: Option<&Bill>, claim: &ClaimContext) -> Result<AuditResult, AuditError> {
    let bill = bill.ok_or(AuditError::MissingInput)?;
    Ok(audit(bill, claim))
}

/// Orchestrates: detect format → extract bill → run rules.
///
/// Holds no per-request state; one instance can serve any number of audits.
pub struct Auditor<R: OcrBackend> {
    images: ImagePipeline<R>,
    pdf: Box<dyn PdfTextSource>,
}

impl<R: OcrBackend> Auditor<R> {
    pub fn new(recognizer: R) -> Self {
        Self::with_pdf_source(recognizer, Box::new(LopdfTextSource))
    }

    pub fn with_pdf_source(recognizer: R, pdf: Box<dyn PdfTextSource>) -> Self {
        Self {
            images: ImagePipeline::new(recognizer),
            pdf,
        }
    }

    /// Turn an upload into the canonical bill, dispatching on its suffix.
    pub fn load_bill(&self, upload: &Upload) -> Result<Bill, AuditError> {
        let format = InputFormat::detect(&upload.filename)?;
        self.load_as(format, &upload.bytes)
    }

    fn load_as(&self, format: InputFormat, bytes: &[u8]) -> Result<Bill, AuditError> {
        let bill = match format {
            InputFormat::TabularCsv => load_csv(bytes)?,
            InputFormat::TabularXlsx => load_xlsx(bytes)?,
            InputFormat::Pdf => extract_pdf_bill(bytes, self.pdf.as_ref())?,
            InputFormat::Image => self.images.extract_bill(bytes)?.bill,
        };
        Ok(bill)
    }

    /// Audit an upload, or the sample bill when nothing was uploaded.
    pub fn audit_upload(
        &self,
        upload: Option<&Upload>,
        claim: ClaimContext,
    ) -> Result<AuditReport, AuditError> {
        let (source, format, bill) = match upload {
            Some(upload) => {
                let format = InputFormat::detect(&upload.filename)?;
                let bill = self.load_as(format, &upload.bytes)?;
                (Some(upload.filename.clone()), Some(format), bill)
            }
            None => (None, None, sample_bill()),
        };

        if bill.is_empty() {
            tracing::warn!(source = source.as_deref(), "No line items extracted");
        }

        let result = audit_bill(Some(&bill), &claim)?;
        tracing::info!(
            source = source.as_deref().unwrap_or("sample"),
            items = bill.len(),
            total = %result.total,
            alerts = result.alerts.len(),
            "Audit complete"
        );

        Ok(AuditReport::new(source, format, bill, result))
    }
}

impl Auditor<Box<dyn OcrBackend>> {
    /// Build an auditor with the OCR engine compiled into this binary.
    pub fn from_config(config: &AuditConfig) -> Self {
        Self::new(recognizer_for(config))
    }
}

#[cfg(feature = "tesseract")]
fn recognizer_for(config: &AuditConfig) -> Box<dyn OcrBackend> {
    Box::new(mediaudit_ocr::TesseractRecognizer::new(
        config.ocr.data_path.clone(),
        &config.ocr.language,
    ))
}

#[cfg(not(feature = "tesseract"))]
fn recognizer_for(config: &AuditConfig) -> Box<dyn OcrBackend> {
    tracing::warn!(
        language = %config.ocr.language,
        "Built without the `tesseract` feature; image uploads will fail"
    );
    Box::new(mediaudit_ocr::UnavailableRecognizer)
}
