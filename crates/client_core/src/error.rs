use shared::protocol::REQUEST_FAILED_MESSAGE;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("classification transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("classification endpoint returned HTTP {status}")]
    Status {
        status: u16,
        detail: Option<String>,
    },
    #[error("malformed classification response: {0}")]
    MalformedBody(String),
    #[error("invalid classification request: {0}")]
    InvalidRequest(String),
}

impl ClassifyError {
    /// Causes are never distinguished in front of the user.
    pub fn user_message(&self) -> &'static str {
        REQUEST_FAILED_MESSAGE
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(err) if err.is_timeout())
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
