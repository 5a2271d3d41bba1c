//! Worker-to-UI events and error modeling for the desktop GUI controller.

use client_core::ClassifyError;
use shared::{domain::SubmissionId, protocol::ClassificationOutcome};

pub enum UiEvent {
    Info(String),
    Error(UiError),
    ClassificationSettled {
        submission: SubmissionId,
        result: Result<ClassificationOutcome, UiError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Server,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Selection,
    Classify,
}

/// Status-line wording for a failed classification. The results area only
/// ever shows the fixed generic message; this is the diagnostic hint.
pub fn describe_classify_failure(message: &str) -> String {
    let lower = message.to_ascii_lowercase();
    if lower.contains("backend worker startup failure") {
        "Background worker failed to start; restart the app.".to_string()
    } else if lower.contains("timed out") || lower.contains("timeout") {
        "Classification endpoint timed out; retry or raise the request timeout.".to_string()
    } else if lower.contains("error sending request")
        || lower.contains("connection refused")
        || lower.contains("dns")
        || lower.contains("transport")
    {
        "Classification endpoint unreachable; check the endpoint URL/network and retry.".to_string()
    } else {
        format!("Classification failed: {message}")
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("http 5")
            || message_lower.contains("internal server error")
            || message_lower.contains("malformed")
        {
            UiErrorCategory::Server
        } else if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("please select")
            || message_lower.contains("please drop")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("transport")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_classify_error(err: &ClassifyError) -> Self {
        let category = match err {
            ClassifyError::Transport(_) => UiErrorCategory::Transport,
            ClassifyError::Status { .. } | ClassifyError::MalformedBody(_) => {
                UiErrorCategory::Server
            }
            ClassifyError::InvalidRequest(_) => UiErrorCategory::Validation,
        };
        let message = match err {
            _ if err.is_timeout() => format!("classification request timed out: {err}"),
            ClassifyError::Status {
                detail: Some(detail),
                ..
            } => format!("{err}: {detail}"),
            _ => err.to_string(),
        };
        Self {
            category,
            context: UiErrorContext::Classify,
            message,
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category,
            UiErrorCategory::Transport | UiErrorCategory::Server
        )
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
