use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::SelectionSource;

/// Error body returned by the classification endpoint on failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    /// Best-effort parse used for diagnostics only.
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("{}", origin.rejection_message())]
    NotAnImage {
        origin: SelectionSource,
        media_type: String,
    },
}

impl SelectionError {
    pub fn origin(&self) -> SelectionSource {
        match self {
            Self::NotAnImage { origin, .. } => *origin,
        }
    }
}
