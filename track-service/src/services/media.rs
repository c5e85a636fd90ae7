//! Upload rules: which multipart file fields are accepted, which extensions
//! each allows, and how stored files are named.

use chrono::Utc;
use service_core::error::AppError;
use std::path::Path;
use uuid::Uuid;

/// Public path prefix that stored uploads are served under.
pub const PUBLIC_PREFIX: &str = "/uploads";

const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "mpeg"];
const COVER_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png", "gif"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Cover,
}

impl MediaKind {
    /// Map a multipart field name to the file it carries.
    pub fn from_field(name: &str) -> Option<Self> {
        match name {
            "audio" => Some(MediaKind::Audio),
            "cover" => Some(MediaKind::Cover),
            _ => None,
        }
    }

    pub fn field_name(self) -> &'static str {
        match self {
            MediaKind::Audio => "audio",
            MediaKind::Cover => "cover",
        }
    }

    pub fn allowed_extensions(self) -> &'static [&'static str] {
        match self {
            MediaKind::Audio => AUDIO_EXTENSIONS,
            MediaKind::Cover => COVER_EXTENSIONS,
        }
    }

    /// Check the extension of the client-supplied file name, case-insensitively.
    pub fn validate_file_name(self, original_name: &str) -> Result<(), AppError> {
        let extension = Path::new(original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension {
            Some(ext) if self.allowed_extensions().contains(&ext.as_str()) => Ok(()),
            _ => Err(AppError::BadRequest(anyhow::anyhow!(
                "Invalid {} file '{}': allowed extensions are {}",
                self.field_name(),
                original_name,
                self.allowed_extensions().join(", ")
            ))),
        }
    }
}

/// A file accepted from the upload form, ready to be written.
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub file_name: String,
    pub data: Vec<u8>,
}

impl StoredFile {
    pub fn new(original_name: &str, data: Vec<u8>) -> Self {
        Self {
            file_name: storage_file_name(original_name, Utc::now().timestamp_millis()),
            data,
        }
    }

    pub fn public_url(&self) -> String {
        format!("{}/{}", PUBLIC_PREFIX, self.file_name)
    }
}

/// `<millis>-<8 hex>-<name>`, where `name` is the basename of the client's
/// file name with anything outside `[A-Za-z0-9._-]` replaced by `_`.
pub fn storage_file_name(original_name: &str, timestamp_millis: i64) -> String {
    // Clients may send Windows paths; treat both separators as path breaks.
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let mut sanitized: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim_matches('.').is_empty() {
        sanitized = "file".to_string();
    }

    let nonce = Uuid::new_v4().simple().to_string();
    format!("{}-{}-{}", timestamp_millis, &nonce[..8], sanitized)
}
