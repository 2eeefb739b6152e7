use std::future::Future;

use futures::future::join_all;
use thiserror::Error;
use tracing::{info, warn};

use crate::document::DocumentRecord;
use crate::ingest::extract::Extractor;
use crate::ingest::{decode_utf8, IngestError};

pub const MARKDOWN_MEDIA_TYPE: &str = "text/markdown";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Please upload Markdown (.md) files")]
    NoMarkdownFiles,
}

/// One user-supplied file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub media_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            media_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    /// `.md` extension (any case) or a declared markdown media type.
    pub fn is_markdown(&self) -> bool {
        self.media_type.as_deref() == Some(MARKDOWN_MEDIA_TYPE)
            || self.name.to_lowercase().ends_with(".md")
    }
}

/// Turns a file blob into text. Suspends until the blob is fully read.
pub trait TextDecoder {
    fn decode(&self, file: &UploadFile) -> impl Future<Output = Result<String, IngestError>>;
}

/// Strict UTF-8 decoding of the in-memory bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct Utf8Decoder;

impl TextDecoder for Utf8Decoder {
    async fn decode(&self, file: &UploadFile) -> Result<String, IngestError> {
        decode_utf8(file.bytes.clone())
    }
}

#[derive(Debug)]
pub struct FailedItem {
    pub name: String,
    pub error: IngestError,
}

/// Result of one upload batch: what parsed and what was skipped.
#[derive(Debug, Default)]
pub struct UploadOutcome {
    pub added: Vec<DocumentRecord>,
    pub failed: Vec<FailedItem>,
}

impl UploadOutcome {
    pub fn added_count(&self) -> usize {
        self.added.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }
}

/// Parse an upload batch.
///
/// Non-markdown files are ignored; a batch with no markdown file at all is
/// rejected. All qualifying files are decoded concurrently and a failure on
/// one file only removes that file from the result.
pub async fn parse_upload<D: TextDecoder>(
    extractor: &Extractor,
    decoder: &D,
    files: &[UploadFile],
) -> Result<UploadOutcome, UploadError> {
    let markdown: Vec<&UploadFile> = files.iter().filter(|f| f.is_markdown()).collect();
    if markdown.is_empty() {
        return Err(UploadError::NoMarkdownFiles);
    }

    let decoded = join_all(markdown.iter().map(|f| decoder.decode(f))).await;

    let mut outcome = UploadOutcome::default();
    for (file, text) in markdown.into_iter().zip(decoded) {
        match text {
            Ok(text) => outcome.added.push(extractor.extract(&file.name, &text)),
            Err(error) => {
                warn!(file = %file.name, error = %error, "skipping unreadable upload");
                outcome.failed.push(FailedItem {
                    name: file.name.clone(),
                    error,
                });
            }
        }
    }

    info!(
        added = outcome.added_count(),
        failed = outcome.failed_count(),
        "upload batch parsed"
    );
    Ok(outcome)
}
