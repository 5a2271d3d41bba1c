use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::error::SelectionError;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(pub u64);

        impl $name {
            pub fn next(self) -> Self {
                Self(self.0.wrapping_add(1))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(SubmissionId);
id_newtype!(PreviewId);

pub const IMAGE_MEDIA_TYPE_PREFIX: &str = "image/";

pub fn is_image_media_type(media_type: &str) -> bool {
    media_type.starts_with(IMAGE_MEDIA_TYPE_PREFIX)
}

/// Where a candidate file came from. Both paths share one validation rule
/// but report rejections with different wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionSource {
    Picker,
    Drop,
}

impl SelectionSource {
    pub fn rejection_message(self) -> &'static str {
        match self {
            Self::Picker => "Please select an image file",
            Self::Drop => "Please drop an image file",
        }
    }
}

/// A file offered by the user that has not been validated yet.
#[derive(Debug, Clone)]
pub struct CandidateFile {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Arc<[u8]>,
}

impl CandidateFile {
    pub fn new(
        file_name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn into_selected(self, origin: SelectionSource) -> Result<SelectedImage, SelectionError> {
        if !is_image_media_type(&self.media_type) {
            return Err(SelectionError::NotAnImage {
                origin,
                media_type: self.media_type,
            });
        }
        Ok(SelectedImage {
            file_name: self.file_name,
            media_type: self.media_type,
            bytes: self.bytes,
        })
    }
}

/// An image that passed validation and is staged for classification.
///
/// Only constructible through [`CandidateFile::into_selected`], so the
/// declared media type always starts with `image/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedImage {
    file_name: String,
    media_type: String,
    bytes: Arc<[u8]>,
}

impl SelectedImage {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_any_image_subtype() {
        for media_type in ["image/png", "image/jpeg", "image/x-portable-anymap", "image/"] {
            let candidate = CandidateFile::new("scan", media_type, vec![1_u8, 2, 3]);
            let selected = candidate
                .into_selected(SelectionSource::Picker)
                .expect("image media type accepted");
            assert_eq!(selected.media_type(), media_type);
            assert_eq!(selected.bytes(), &[1, 2, 3]);
        }
    }

    #[test]
    fn rejects_non_image_media_types_with_source_specific_wording() {
        for media_type in ["application/pdf", "text/plain", "", "IMAGE/PNG", "video/mp4"] {
            let picked = CandidateFile::new("f", media_type, Vec::new())
                .into_selected(SelectionSource::Picker)
                .expect_err("picker rejects");
            assert_eq!(picked.to_string(), "Please select an image file");

            let dropped = CandidateFile::new("f", media_type, Vec::new())
                .into_selected(SelectionSource::Drop)
                .expect_err("drop rejects");
            assert_eq!(dropped.to_string(), "Please drop an image file");
        }
    }

    #[test]
    fn submission_ids_advance() {
        let first = SubmissionId(0).next();
        assert_eq!(first, SubmissionId(1));
        assert!(first.next() > first);
    }
}
