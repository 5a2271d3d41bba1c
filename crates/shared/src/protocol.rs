use std::fmt;

use serde::{Deserialize, Serialize};

/// Multipart field carrying the image bytes.
pub const IMAGE_FIELD: &str = "image";

pub const TUMOR_DETECTED_LABEL: &str = "Tumor Detected";
pub const NO_TUMOR_DETECTED_LABEL: &str = "No Tumor Detected";

/// Shown for every failed classification request, whatever the cause.
pub const REQUEST_FAILED_MESSAGE: &str = "An error occurred while processing the image";

/// Model certainty as reported by the endpoint. Some deployments send a
/// preformatted percentage string, others a bare number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Confidence {
    Text(String),
    Number(f64),
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(value) => write!(f, "{value}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub result: String,
    #[serde(default)]
    pub confidence: Option<Confidence>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    TumorDetected,
    Clear,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationOutcome {
    pub label: String,
    pub confidence: Option<Confidence>,
}

impl ClassificationOutcome {
    pub fn new(label: impl Into<String>, confidence: Option<Confidence>) -> Self {
        let confidence = confidence.filter(|c| !matches!(c, Confidence::Text(text) if text.is_empty()));
        Self {
            label: label.into(),
            confidence,
        }
    }

    /// Only the exact positive label gets the alert treatment.
    pub fn verdict(&self) -> Verdict {
        if self.label == TUMOR_DETECTED_LABEL {
            Verdict::TumorDetected
        } else {
            Verdict::Clear
        }
    }

    pub fn confidence_text(&self) -> Option<String> {
        self.confidence
            .as_ref()
            .map(|confidence| format!("Confidence: {confidence}"))
    }
}

impl From<ClassifyResponse> for ClassificationOutcome {
    fn from(value: ClassifyResponse) -> Self {
        Self::new(value.result, value.confidence)
    }
}
