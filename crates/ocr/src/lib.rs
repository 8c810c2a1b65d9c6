pub mod pipeline;
pub mod preprocess;
pub mod recognizer;
pub mod types;

pub use pipeline::{ImageExtraction, ImagePipeline, PipelineError};
pub use preprocess::{prepare_for_ocr, PreprocessError};
pub use recognizer::{MockRecognizer, OcrBackend, OcrError, UnavailableRecognizer};
pub use types::OcrFragment;

#[cfg(feature = "tesseract")]
pub use recognizer::tesseract_backend::TesseractRecognizer;
