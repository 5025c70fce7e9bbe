//! Client-side media checks run before a multipart form is built.

use std::path::Path;

use crate::api::FilePart;
use crate::errors::{ClientError, ValidationError, ValidationIssue, ValidationResult};

pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;
pub const MAX_VIDEO_BYTES: usize = 100 * 1024 * 1024;
pub const MAX_AUDIO_BYTES: usize = 20 * 1024 * 1024;
pub const MAX_FILES_PER_POST: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Audio,
}

impl MediaKind {
    pub fn max_bytes(&self) -> usize {
        match self {
            MediaKind::Image => MAX_IMAGE_BYTES,
            MediaKind::Video => MAX_VIDEO_BYTES,
            MediaKind::Audio => MAX_AUDIO_BYTES,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
        }
    }
}

const MEDIA_TYPES: &[(&str, MediaKind, &str)] = &[
    ("jpg", MediaKind::Image, "image/jpeg"),
    ("jpeg", MediaKind::Image, "image/jpeg"),
    ("png", MediaKind::Image, "image/png"),
    ("gif", MediaKind::Image, "image/gif"),
    ("webp", MediaKind::Image, "image/webp"),
    ("mp4", MediaKind::Video, "video/mp4"),
    ("webm", MediaKind::Video, "video/webm"),
    ("mov", MediaKind::Video, "video/quicktime"),
    ("mp3", MediaKind::Audio, "audio/mpeg"),
    ("wav", MediaKind::Audio, "audio/wav"),
    ("ogg", MediaKind::Audio, "audio/ogg"),
    ("weba", MediaKind::Audio, "audio/webm"),
];

/// A file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn read(path: &Path) -> Result<Self, ClientError> {
        let bytes = std::fs::read(path)
            .map_err(|err| ClientError::Storage(format!("failed to read {}: {err}", path.display())))?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(file_name, bytes))
    }
}

/// Media kind and MIME type inferred from the file extension.
pub fn classify(file_name: &str) -> Option<(MediaKind, &'static str)> {
    let (_, extension) = file_name.rsplit_once('.')?;
    let extension = extension.to_ascii_lowercase();
    MEDIA_TYPES
        .iter()
        .find(|(ext, _, _)| *ext == extension)
        .map(|(_, kind, mime)| (*kind, *mime))
}

/// Checks count, type and size; one issue per offending file.
pub fn validate_uploads(files: &[UploadFile]) -> ValidationResult<()> {
    let mut issues = Vec::new();
    if files.len() > MAX_FILES_PER_POST {
        issues.push(ValidationIssue::new(
            "media",
            "too_many_files",
            format!("At most {MAX_FILES_PER_POST} files can be attached"),
        ));
    }
    for file in files {
        let field = format!("media.{}", file.file_name);
        match classify(&file.file_name) {
            None => issues.push(ValidationIssue::new(
                field,
                "unsupported_type",
                format!("{} is not a supported image, video or audio file", file.file_name),
            )),
            Some((_, _)) if file.bytes.is_empty() => {
                issues.push(ValidationIssue::new(field, "empty", format!("{} is empty", file.file_name)))
            }
            Some((kind, _)) if file.bytes.len() > kind.max_bytes() => issues.push(ValidationIssue::new(
                field,
                "too_large",
                format!(
                    "{} exceeds the {} MB {} limit",
                    file.file_name,
                    kind.max_bytes() / (1024 * 1024),
                    kind.label()
                ),
            )),
            Some(_) => {}
        }
    }
    ValidationError::new(issues).into_result()
}

/// Validates `files` and converts them into multipart parts named `field`.
pub fn media_parts(field: &str, files: Vec<UploadFile>) -> ValidationResult<Vec<FilePart>> {
    validate_uploads(&files)?;
    Ok(files
        .into_iter()
        .filter_map(|file| {
            let (_, mime) = classify(&file.file_name)?;
            Some(FilePart {
                field: field.to_string(),
                file_name: file.file_name,
                content_type: mime.to_string(),
                bytes: file.bytes,
            })
        })
        .collect())
}
