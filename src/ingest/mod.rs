pub mod bulk;
pub mod extract;
pub mod frontmatter;
pub mod policy;
pub mod upload;

use thiserror::Error;

pub use bulk::BulkLoader;
pub use extract::Extractor;
pub use frontmatter::parse_frontmatter;
pub use policy::{DateSource, ExtractionPolicy, Placeholders, SummaryRule, TagRule, ThumbnailSeed};
pub use upload::{
    parse_upload, FailedItem, TextDecoder, UploadError, UploadFile, UploadOutcome, Utf8Decoder,
};

/// Failure to turn one input into text. Always scoped to that single item.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Content must be valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unreadable input {name}: {reason}")]
    Unreadable { name: String, reason: String },
}

/// Decode raw bytes as UTF-8 text.
pub fn decode_utf8(bytes: Vec<u8>) -> Result<String, IngestError> {
    Ok(String::from_utf8(bytes)?)
}
