//! Backend commands queued from UI to backend worker.

use shared::domain::{SelectedImage, SubmissionId};

pub enum BackendCommand {
    Classify {
        submission: SubmissionId,
        image: SelectedImage,
    },
    Cancel {
        submission: SubmissionId,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Classify { .. } => "classify",
            BackendCommand::Cancel { .. } => "cancel",
        }
    }
}
