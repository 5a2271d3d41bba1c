//! Upload-and-classify state and its transitions.
//!
//! Everything here is free of egui and channels: the UI shell feeds user and
//! worker events in, dispatches whatever commands come back out, and renders
//! from [`ClassifierState::view`].

use std::sync::Arc;

use shared::{
    domain::{CandidateFile, PreviewId, SelectedImage, SelectionSource, SubmissionId},
    protocol::{ClassificationOutcome, Verdict, REQUEST_FAILED_MESSAGE},
};

use crate::media::{decode_preview_image, PreviewImage};

pub const UPLOAD_PROMPT: &str = "Drag and drop your MRI scan here, or click to select";
pub const SUBMIT_LABEL: &str = "Analyze Image";
pub const SUBMIT_BUSY_LABEL: &str = "Processing...";
pub const RESULTS_TITLE: &str = "Results";

/// Display-only reference to the staged image. Pixels are absent when the
/// bytes could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewHandle {
    id: PreviewId,
    image: Option<Arc<PreviewImage>>,
}

impl PreviewHandle {
    pub fn id(&self) -> PreviewId {
        self.id
    }

    pub fn image(&self) -> Option<&PreviewImage> {
        self.image.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Staged {
        /// In-flight submission cancelled by this selection.
        superseded: Option<SubmissionId>,
    },
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub submission: SubmissionId,
    pub image: SelectedImage,
}

#[derive(Debug, Default)]
pub struct ClassifierState {
    selected: Option<SelectedImage>,
    preview: Option<PreviewHandle>,
    outcome: Option<ClassificationOutcome>,
    error: Option<String>,
    in_flight: Option<SubmissionId>,
    last_submission: SubmissionId,
    last_preview: PreviewId,
}

impl ClassifierState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, candidate: CandidateFile, origin: SelectionSource) -> Selection {
        let image = match candidate.into_selected(origin) {
            Ok(image) => image,
            Err(err) => {
                tracing::debug!(reason = %err, origin = ?err.origin(), "rejected selection");
                self.error = Some(err.to_string());
                return Selection::Rejected;
            }
        };

        let decoded = match decode_preview_image(image.bytes()) {
            Ok(preview) => Some(Arc::new(preview)),
            Err(err) => {
                tracing::warn!(file_name = image.file_name(), "preview decode failed: {err}");
                None
            }
        };
        self.last_preview = self.last_preview.next();
        self.preview = Some(PreviewHandle {
            id: self.last_preview,
            image: decoded,
        });
        self.selected = Some(image);
        self.outcome = None;
        self.error = None;

        let superseded = self.in_flight.take();
        if let Some(submission) = superseded {
            tracing::info!(%submission, "new selection supersedes in-flight submission");
        }
        Selection::Staged { superseded }
    }

    /// A file that could not even be read is reported like a rejected one.
    pub fn reject_unreadable(&mut self, origin: SelectionSource) {
        self.error = Some(origin.rejection_message().to_string());
    }

    /// Starts a submission for the staged image. Returns `None` without
    /// touching state when nothing is staged or a request is already out.
    pub fn begin_submission(&mut self) -> Option<SubmissionRequest> {
        if self.in_flight.is_some() {
            return None;
        }
        let image = self.selected.clone()?;

        self.last_submission = self.last_submission.next();
        let submission = self.last_submission;
        self.in_flight = Some(submission);
        self.error = None;
        Some(SubmissionRequest { submission, image })
    }

    /// Applies a settled request. Stale settlements are ignored; returns
    /// whether the state changed.
    pub fn settle<E>(
        &mut self,
        submission: SubmissionId,
        result: Result<ClassificationOutcome, E>,
    ) -> bool {
        if self.in_flight != Some(submission) {
            tracing::debug!(%submission, "ignoring stale settlement");
            return false;
        }
        self.in_flight = None;

        match result {
            Ok(outcome) => {
                self.outcome = Some(outcome);
                self.error = None;
            }
            Err(_) => {
                self.outcome = None;
                self.error = Some(REQUEST_FAILED_MESSAGE.to_string());
            }
        }
        true
    }

    /// Releases the preview and returns any submission the caller should
    /// cancel.
    pub fn teardown(&mut self) -> Option<SubmissionId> {
        self.preview = None;
        self.in_flight.take()
    }

    pub fn preview(&self) -> Option<&PreviewHandle> {
        self.preview.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn view(&self) -> ViewModel<'_> {
        let drop_zone = match &self.preview {
            Some(preview) => DropZone::Preview(preview),
            None => DropZone::Prompt(UPLOAD_PROMPT),
        };
        let submit = SubmitControl {
            enabled: self.selected.is_some() && !self.is_loading(),
            label: if self.is_loading() {
                SUBMIT_BUSY_LABEL
            } else {
                SUBMIT_LABEL
            },
        };
        let results = self
            .outcome
            .as_ref()
            .filter(|outcome| !outcome.label.is_empty())
            .map(|outcome| ResultsPanel {
                title: RESULTS_TITLE,
                label: &outcome.label,
                tone: match outcome.verdict() {
                    Verdict::TumorDetected => Tone::Alert,
                    Verdict::Clear => Tone::Success,
                },
                confidence_text: outcome.confidence_text(),
            });

        ViewModel {
            drop_zone,
            error: self.error.as_deref(),
            submit,
            results,
        }
    }
}

#[cfg(test)]
impl ClassifierState {
    pub fn selected(&self) -> Option<&SelectedImage> {
        self.selected.as_ref()
    }

    pub fn outcome(&self) -> Option<&ClassificationOutcome> {
        self.outcome.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn in_flight(&self) -> Option<SubmissionId> {
        self.in_flight
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel<'a> {
    pub drop_zone: DropZone<'a>,
    pub error: Option<&'a str>,
    pub submit: SubmitControl,
    pub results: Option<ResultsPanel<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DropZone<'a> {
    Prompt(&'static str),
    Preview(&'a PreviewHandle),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitControl {
    pub enabled: bool,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Alert,
    Success,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultsPanel<'a> {
    pub title: &'static str,
    pub label: &'a str,
    pub tone: Tone,
    pub confidence_text: Option<String>,
}

#[cfg(test)]
#[path = "../tests/reducer_tests.rs"]
mod tests;
