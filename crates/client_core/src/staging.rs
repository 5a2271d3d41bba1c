//! Turning files on disk into unvalidated selection candidates.

use std::{fs, path::Path};

use anyhow::Context;
use shared::domain::CandidateFile;

const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";
const FALLBACK_FILE_NAME: &str = "image";

/// Media type declared for a file on disk, guessed from its extension.
pub fn guess_media_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first()
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_else(|| FALLBACK_MEDIA_TYPE.to_string())
}

pub fn display_file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| FALLBACK_FILE_NAME.to_string())
}

pub fn stage_image_file(path: &Path) -> anyhow::Result<CandidateFile> {
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read image file '{}'", path.display()))?;
    Ok(CandidateFile::new(
        display_file_name(path),
        guess_media_type(path),
        bytes,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::SelectionSource;
    use std::{
        env,
        path::PathBuf,
        time::{SystemTime, UNIX_EPOCH},
    };

    #[test]
    fn guesses_media_type_from_extension() {
        assert_eq!(guess_media_type(Path::new("scan.png")), "image/png");
        assert_eq!(guess_media_type(Path::new("scan.JPG")), "image/jpeg");
        assert_eq!(guess_media_type(Path::new("report.pdf")), "application/pdf");
        assert_eq!(guess_media_type(Path::new("no_extension")), FALLBACK_MEDIA_TYPE);
    }

    #[test]
    fn stages_file_contents_and_name() {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let dir = env::temp_dir().join(format!("mri_classifier_staging_test_{suffix}"));
        fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("brain.png");
        fs::write(&path, b"not really a png").expect("write");

        let candidate = stage_image_file(&path).expect("stage");
        assert_eq!(candidate.file_name, "brain.png");
        assert_eq!(candidate.media_type, "image/png");
        let selected = candidate
            .into_selected(SelectionSource::Picker)
            .expect("image media type");
        assert_eq!(selected.bytes(), b"not really a png");

        fs::remove_dir_all(dir).expect("cleanup");
    }

    #[test]
    fn missing_file_reports_path() {
        let path = PathBuf::from("/definitely/not/here/scan.png");
        let err = stage_image_file(&path).expect_err("missing file");
        assert!(err.to_string().contains("/definitely/not/here/scan.png"));
    }
}
