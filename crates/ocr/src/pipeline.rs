use mediaudit_core::{parse_lines, Bill};
use thiserror::Error;

use crate::preprocess::{self, PreprocessError};
use crate::recognizer::{OcrBackend, OcrError};
use crate::types::OcrFragment;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Image preprocessing failed: {0}")]
    Preprocess(#[from] PreprocessError),
    #[error("OCR recognition failed: {0}")]
    Ocr(#[from] OcrError),
}

/// The result of running one raster bill through OCR.
#[derive(Debug, Clone)]
pub struct ImageExtraction {
    /// Everything the engine recognized, in its native order.
    pub fragments: Vec<OcrFragment>,
    /// Line items parsed from those fragments.
    pub bill: Bill,
}

/// Orchestrates: preprocess → OCR → line parsing.
pub struct ImagePipeline<R: OcrBackend> {
    recognizer: R,
}

impl<R: OcrBackend> ImagePipeline<R> {
    pub fn new(recognizer: R) -> Self {
        Self { recognizer }
    }

    /// Process raw PNG/JPEG bytes. Each fragment is a candidate bill line.
    pub fn extract_bill(&self, data: &[u8]) -> Result<ImageExtraction, PipelineError> {
        let image_bytes = preprocess::prepare_for_ocr(data)?;
        let fragments = self.recognizer.recognize(&image_bytes)?;
        let scan = parse_lines(fragments.iter().map(|f| f.text.as_str()));

        tracing::info!(
            fragments = fragments.len(),
            items = scan.bill.len(),
            rejected = scan.rejected,
            "Extracted image bill"
        );

        Ok(ImageExtraction {
            fragments,
            bill: scan.bill,
        })
    }
}
