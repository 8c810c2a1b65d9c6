use thiserror::Error;

use crate::types::OcrFragment;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Image decode error: {0}")]
    ImageDecode(String),
    #[error("OCR engine error: {0}")]
    Engine(String),
    #[error("Tesseract not available: build with the `tesseract` feature")]
    NotAvailable,
}

/// Abstraction over an OCR backend.
/// Implementations accept PNG image bytes and return recognized text fragments
/// in the engine's native reading order.
pub trait OcrBackend: Send + Sync {
    fn recognize(&self, image_bytes: &[u8]) -> Result<Vec<OcrFragment>, OcrError>;
}

impl<T: OcrBackend + ?Sized> OcrBackend for Box<T> {
    fn recognize(&self, image_bytes: &[u8]) -> Result<Vec<OcrFragment>, OcrError> {
        (**self).recognize(image_bytes)
    }
}

// ── Mock backend (always available, used for tests) ───────────────────────────

/// Returns pre-set fragments regardless of the image.
pub struct MockRecognizer {
    pub fragments: Vec<OcrFragment>,
}

impl MockRecognizer {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fragments: lines.into_iter().map(|l| OcrFragment::new(l, 1.0)).collect(),
        }
    }

    /// A recognizer that never finds any text.
    pub fn blank() -> Self {
        Self { fragments: vec![] }
    }
}

impl OcrBackend for MockRecognizer {
    fn recognize(&self, _image_bytes: &[u8]) -> Result<Vec<OcrFragment>, OcrError> {
        Ok(self.fragments.clone())
    }
}

/// Stand-in used when no OCR engine was compiled in.
pub struct UnavailableRecognizer;

impl OcrBackend for UnavailableRecognizer {
    fn recognize(&self, _image_bytes: &[u8]) -> Result<Vec<OcrFragment>, OcrError> {
        Err(OcrError::NotAvailable)
    }
}

// ── Tesseract backend (optional, gated behind `tesseract` feature) ─────────────

#[cfg(feature = "tesseract")]
pub mod tesseract_backend {
    use super::{OcrBackend, OcrError};
    use crate::types::OcrFragment;
    use leptess::LepTess;

    pub struct TesseractRecognizer {
        data_path: Option<String>,
        lang: String,
    }

    impl TesseractRecognizer {
        pub fn new(data_path: Option<String>, lang: &str) -> Self {
            Self { data_path, lang: lang.to_string() }
        }
    }

    impl OcrBackend for TesseractRecognizer {
        fn recognize(&self, image_bytes: &[u8]) -> Result<Vec<OcrFragment>, OcrError> {
            // LepTess is not Sync; build one per request.
            let mut lt = LepTess::new(self.data_path.as_deref(), &self.lang)
                .map_err(|e| OcrError::Engine(e.to_string()))?;
            lt.set_image_from_mem(image_bytes)
                .map_err(|e| OcrError::ImageDecode(e.to_string()))?;
            let text = lt.get_utf8_text().map_err(|e| OcrError::Engine(e.to_string()))?;
            let confidence = lt.mean_text_conf() as f32 / 100.0;

            Ok(text
                .lines()
                .filter(|l| !l.trim().is_empty())
                .map(|l| OcrFragment::new(l, confidence))
                .collect())
        }
    }
}
