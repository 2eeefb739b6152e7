use serde::{Deserialize, Serialize};

use crate::types::identifiers::RecordId;

/// The canonical unit of the catalogue: one markdown script plus its display
/// metadata.
///
/// Every field is always populated. Parsers substitute documented
/// placeholders for anything the source text does not provide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub id: RecordId,
    pub title: String,
    /// `YYYY-MM-DD`, not validated.
    pub date: String,
    pub thumbnail_url: String,
    pub youtube_url: String,
    pub tags: Vec<String>,
    pub summary: String,
    /// Full markdown body. Never rewritten by metadata extraction.
    pub content: String,
}

impl DocumentRecord {
    /// Comma-joined tag list, the form the editor shows for editing.
    pub fn tag_line(&self) -> String {
        self.tags.join(", ")
    }
}

/// Split a comma separated tag list, trimming entries and dropping empties.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}
