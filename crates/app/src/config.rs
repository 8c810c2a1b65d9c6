use serde::{Deserialize, Serialize};

use crate::error::AuditError;

/// Runtime settings for the extraction backends. Audit thresholds are fixed
/// and deliberately absent here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    pub ocr: OcrConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Tesseract language code.
    pub language: String,
    /// Directory holding `tessdata`; the engine default when unset.
    pub data_path: Option<String>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            data_path: None,
        }
    }
}

impl AuditConfig {
    pub fn from_toml(toml_content: &str) -> Result<Self, AuditError> {
        Ok(toml::from_str(toml_content)?)
    }
}
