use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("Unsupported file format: '{0}'")]
    Unsupported(String),
}

/// The encodings a bill can arrive in, decided by filename suffix alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputFormat {
    TabularCsv,
    TabularXlsx,
    Pdf,
    Image,
}

impl InputFormat {
    /// Match the text after the last `.`, ignoring case. A name that is only
    /// a suffix, such as `.csv`, still counts.
    pub fn detect(filename: &str) -> Result<Self, FormatError> {
        let lower = filename.to_lowercase();
        let (_, ext) = lower
            .rsplit_once('.')
            .ok_or_else(|| FormatError::Unsupported(filename.to_string()))?;

        match ext {
            "csv" => Ok(InputFormat::TabularCsv),
            "xlsx" => Ok(InputFormat::TabularXlsx),
            "pdf" => Ok(InputFormat::Pdf),
            "png" | "jpg" | "jpeg" => Ok(InputFormat::Image),
            _ => Err(FormatError::Unsupported(filename.to_string())),
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFormat::TabularCsv => write!(f, "tabular_csv"),
            InputFormat::TabularXlsx => write!(f, "tabular_xlsx"),
            InputFormat::Pdf => write!(f, "pdf"),
            InputFormat::Image => write!(f, "image"),
        }
    }
}
