use serde::{Deserialize, Serialize};

/// One piece of recognized text, in the order the OCR engine emitted it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrFragment {
    pub text: String,
    /// Engine confidence (0.0–1.0). Reported, never used to filter.
    pub confidence: f32,
}

impl OcrFragment {
    pub fn new(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_clamps_confidence() {
        assert_eq!(OcrFragment::new("x", 1.5).confidence, 1.0);
        assert_eq!(OcrFragment::new("x", -0.1).confidence, 0.0);
        assert_eq!(OcrFragment::new("x", 0.42).confidence, 0.42);
    }
}
