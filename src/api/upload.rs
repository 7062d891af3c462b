// SPDX-License-Identifier: MPL-2.0
//! Multipart payload construction for `POST /images/upload`.
//!
//! Two kinds of sources are supported: a local file, whose content type is
//! inferred from its extension, and a remote URL whose bytes are fetched first
//! and always sent as a JPEG named `upload.jpg`.

use super::error::{ApiError, ApiResult};
use reqwest::multipart::{Form, Part};
use std::fmt;
use std::path::{Path, PathBuf};

/// Multipart field name expected by the service.
pub const UPLOAD_FIELD: &str = "file";

/// Extensions offered by the file picker.
pub const PICKER_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

const FILE_URI_PREFIX: &str = "file://";
const REMOTE_FILE_NAME: &str = "upload.jpg";
const MIME_PNG: &str = "image/png";
const MIME_JPEG: &str = "image/jpeg";

/// Where the bytes of an upload come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadSource {
    /// A file on the local file system.
    File(PathBuf),
    /// An `http(s)` URL whose content is downloaded before uploading.
    Remote(String),
}

impl UploadSource {
    /// Interprets free-form user input as a source.
    ///
    /// `http://` and `https://` inputs are remote, `file://` URIs and anything
    /// else are local paths. Blank input yields `None`.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }

        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return Some(UploadSource::Remote(trimmed.to_string()));
        }

        let path = trimmed.strip_prefix(FILE_URI_PREFIX).unwrap_or(trimmed);
        Some(UploadSource::File(PathBuf::from(path)))
    }

    /// Returns `true` when the source cannot point at anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            UploadSource::File(path) => path.as_os_str().is_empty(),
            UploadSource::Remote(url) => url.trim().is_empty(),
        }
    }
}

impl fmt::Display for UploadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadSource::File(path) => write!(f, "{}", path.display()),
            UploadSource::Remote(url) => f.write_str(url),
        }
    }
}

/// Bytes ready to be attached to the multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPayload {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime: &'static str,
}

impl UploadPayload {
    /// Reads a local file and derives name and content type from its extension.
    pub async fn from_file(path: &Path) -> ApiResult<Self> {
        let bytes = tokio::fs::read(path).await?;
        let extension = extension_of(path);
        Ok(Self {
            bytes,
            file_name: file_name_for(extension.as_deref()),
            mime: content_type_for(extension.as_deref()),
        })
    }

    /// Wraps bytes downloaded from a remote source.
    #[must_use]
    pub fn from_remote_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            file_name: REMOTE_FILE_NAME.to_string(),
            mime: MIME_JPEG,
        }
    }

    /// Builds the multipart form sent to the service.
    pub fn into_form(self) -> ApiResult<Form> {
        let part = Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(self.mime)
            .map_err(|e| ApiError::Unexpected(e.to_string()))?;
        Ok(Form::new().part(UPLOAD_FIELD, part))
    }
}

/// Lower-cased extension of a path, if any.
fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .filter(|ext| !ext.is_empty())
}

/// `png` maps to `image/png`, everything else is sent as JPEG.
#[must_use]
pub fn content_type_for(extension: Option<&str>) -> &'static str {
    match extension {
        Some(ext) if ext.eq_ignore_ascii_case("png") => MIME_PNG,
        _ => MIME_JPEG,
    }
}

#[must_use]
pub fn file_name_for(extension: Option<&str>) -> String {
    match extension {
        Some(ext) => format!("upload.{}", ext.to_ascii_lowercase()),
        None => REMOTE_FILE_NAME.to_string(),
    }
}
