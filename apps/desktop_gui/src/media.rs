//! Image decoding for on-screen previews and turning dropped files into
//! selection candidates.

use anyhow::Context;
use shared::domain::CandidateFile;

/// Extensions offered by the picker's image filter.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "tiff"];

const PREVIEW_MAX_DIMENSION: u32 = 1024;

#[derive(Clone, PartialEq, Eq)]
pub struct PreviewImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

impl std::fmt::Debug for PreviewImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

pub fn decode_preview_image(bytes: &[u8]) -> Result<PreviewImage, String> {
    let dynamic = image::load_from_memory(bytes).map_err(|err| err.to_string())?;
    let resized = dynamic
        .thumbnail(PREVIEW_MAX_DIMENSION, PREVIEW_MAX_DIMENSION)
        .to_rgba8();
    let width = resized.width() as usize;
    let height = resized.height() as usize;
    Ok(PreviewImage {
        width,
        height,
        rgba: resized.into_raw(),
    })
}

/// Builds a candidate from a dropped file. Native drops carry a path, web
/// drops carry bytes. A non-empty declared media type on the drop wins over
/// the extension guess.
pub fn candidate_from_dropped(file: &egui::DroppedFile) -> anyhow::Result<Option<CandidateFile>> {
    let declared = Some(file.mime.trim()).filter(|mime| !mime.is_empty());

    if let Some(path) = &file.path {
        let mut candidate = client_core::stage_image_file(path)?;
        if let Some(mime) = declared {
            candidate.media_type = mime.to_string();
        }
        return Ok(Some(candidate));
    }

    if let Some(bytes) = &file.bytes {
        let media_type = declared
            .map(str::to_string)
            .unwrap_or_else(|| client_core::guess_media_type(std::path::Path::new(&file.name)));
        let name = if file.name.is_empty() {
            "image".to_string()
        } else {
            file.name.clone()
        };
        return Ok(Some(CandidateFile::new(name, media_type, bytes.to_vec())));
    }

    Ok(None)
}

pub fn pick_image_file() -> Option<std::path::PathBuf> {
    rfd::FileDialog::new()
        .set_title("Select an MRI scan")
        .add_filter("Images", IMAGE_EXTENSIONS)
        .add_filter("All files", &["*"])
        .pick_file()
}

pub fn read_picked_file(path: &std::path::Path) -> anyhow::Result<CandidateFile> {
    client_core::stage_image_file(path)
        .with_context(|| format!("could not load '{}'", path.display()))
}

#[cfg(test)]
pub(crate) fn encode_test_png(width: u32, height: u32) -> Vec<u8> {
    let image = image::RgbaImage::from_pixel(width, height, image::Rgba([40, 90, 200, 255]));
    let mut out = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(image)
        .write_to(&mut out, image::ImageFormat::Png)
        .expect("encode png");
    out.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn decodes_png_into_rgba_preview() {
        let preview = decode_preview_image(&encode_test_png(4, 3)).expect("decode");
        assert_eq!((preview.width, preview.height), (4, 3));
        assert_eq!(preview.rgba.len(), 4 * 3 * 4);
    }

    #[test]
    fn shrinks_large_images_for_preview() {
        let preview = decode_preview_image(&encode_test_png(2048, 1024)).expect("decode");
        assert_eq!((preview.width, preview.height), (1024, 512));
    }

    #[test]
    fn rejects_undecodable_bytes() {
        assert!(decode_preview_image(b"definitely not an image").is_err());
    }

    #[test]
    fn dropped_bytes_use_declared_media_type() {
        let file = egui::DroppedFile {
            name: "scan.dat".to_string(),
            mime: "image/png".to_string(),
            bytes: Some(Arc::from(encode_test_png(1, 1))),
            ..Default::default()
        };
        let candidate = candidate_from_dropped(&file)
            .expect("no io")
            .expect("candidate");
        assert_eq!(candidate.media_type, "image/png");
        assert_eq!(candidate.file_name, "scan.dat");
    }

    #[test]
    fn dropped_bytes_without_media_type_fall_back_to_extension() {
        let file = egui::DroppedFile {
            name: "notes.txt".to_string(),
            bytes: Some(Arc::from(b"hello".to_vec())),
            ..Default::default()
        };
        let candidate = candidate_from_dropped(&file)
            .expect("no io")
            .expect("candidate");
        assert_eq!(candidate.media_type, "text/plain");
    }

    #[test]
    fn empty_drop_yields_nothing() {
        let file = egui::DroppedFile::default();
        assert!(candidate_from_dropped(&file).expect("no io").is_none());
    }
}
