//! Applicant file intake.
//!
//! Files are validated while the multipart body is parsed but only written to
//! disk once the whole submission has passed validation.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Failed to prepare upload directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write upload {name}: {source}")]
    Write {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Permitted extension set for an upload field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    Image,
    Pdf,
}

impl FileCategory {
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            FileCategory::Image => &["png", "jpg", "jpeg"],
            FileCategory::Pdf => &["pdf"],
        }
    }

    /// Lowercased extension if `filename` ends in a permitted one.
    pub fn accepts(&self, filename: &str) -> Option<String> {
        let (_, ext) = filename.rsplit_once('.')?;
        let ext = ext.to_ascii_lowercase();
        self.extensions().contains(&ext.as_str()).then_some(ext)
    }
}

/// A file part received with a submission, still in memory.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// A validated file waiting to be stored under `stored_name`.
#[derive(Debug, Clone)]
pub struct AcceptedFile {
    pub stored_name: String,
    pub bytes: Vec<u8>,
}

impl AcceptedFile {
    /// Validates the extension and computes the on-disk name.
    pub fn accept(file: IncomingFile, category: FileCategory, now: DateTime<Utc>) -> Option<Self> {
        let ext = category.accepts(&file.filename)?;
        let sanitized = sanitize_filename(&file.filename, &ext);
        Some(Self {
            stored_name: timestamped_name(now, &sanitized),
            bytes: file.bytes,
        })
    }
}

/// Reduces a client-supplied name to `[A-Za-z0-9._-]`.
///
/// Any directory part is dropped, whitespace becomes `_`, non-ASCII characters
/// are removed, and leading or trailing dots and underscores are stripped.
/// Falls back to `arquivo.<ext>` when nothing usable remains.
pub fn sanitize_filename(original: &str, ext: &str) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let mut cleaned = String::with_capacity(base.len());
    for c in base.chars() {
        if c.is_whitespace() {
            cleaned.push('_');
        } else if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
            cleaned.push(c);
        }
    }

    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_');
    let has_stem = trimmed
        .rsplit_once('.')
        .map(|(stem, _)| !stem.trim_matches(|c| c == '.' || c == '_').is_empty())
        .unwrap_or(false);

    if trimmed.is_empty() || !has_stem {
        format!("arquivo.{}", ext)
    } else {
        trimmed.to_string()
    }
}

/// `<YYYYmmddHHMMSS><microseconds>_<name>` in UTC.
pub fn timestamped_name(now: DateTime<Utc>, sanitized: &str) -> String {
    format!("{}_{}", now.format("%Y%m%d%H%M%S%6f"), sanitized)
}

/// Upload directory served under `/static/uploads`.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn ensure_dir(&self) -> Result<(), UploadError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| UploadError::CreateDir {
                path: self.dir.clone(),
                source,
            })
    }

    pub async fn save(&self, file: &AcceptedFile) -> Result<(), UploadError> {
        tokio::fs::write(self.dir.join(&file.stored_name), &file.bytes)
            .await
            .map_err(|source| UploadError::Write {
                name: file.stored_name.clone(),
                source,
            })
    }

    /// Best-effort delete used to undo a partially completed submission.
    pub async fn remove(&self, stored_name: &str) {
        if let Err(e) = tokio::fs::remove_file(self.dir.join(stored_name)).await {
            tracing::warn!(file = %stored_name, error = %e, "Failed to remove upload");
        }
    }
}
