//! Author-side editing of single records.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::document::{split_tags, DocumentRecord};
use crate::ingest::policy::DEFAULT_YOUTUBE_URL;
use crate::types::identifiers::RecordId;

pub const NEW_THUMBNAIL_URL: &str = "https://picsum.photos/seed/new/600/400";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

/// Form state for creating or editing one record.
///
/// Tags are edited as a single comma separated string and only split when
/// the draft is turned back into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorDraft {
    pub id: RecordId,
    pub title: String,
    pub date: String,
    pub thumbnail_url: String,
    pub youtube_url: String,
    pub tag_input: String,
    pub summary: String,
    pub content: String,
}

impl EditorDraft {
    /// Empty draft for a new record.
    pub fn blank(now: DateTime<Utc>) -> Self {
        Self {
            id: RecordId::generate(now),
            title: String::new(),
            date: now.format("%Y-%m-%d").to_string(),
            thumbnail_url: NEW_THUMBNAIL_URL.into(),
            youtube_url: DEFAULT_YOUTUBE_URL.into(),
            tag_input: String::new(),
            summary: String::new(),
            content: String::new(),
        }
    }

    /// Draft seeded from an existing record.
    pub fn from_record(record: &DocumentRecord) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            date: record.date.clone(),
            thumbnail_url: record.thumbnail_url.clone(),
            youtube_url: record.youtube_url.clone(),
            tag_input: record.tag_line(),
            summary: record.summary.clone(),
            content: record.content.clone(),
        }
    }

    /// Full replacement record. Title and date are required.
    pub fn into_record(self) -> Result<DocumentRecord, EditorError> {
        if self.title.trim().is_empty() {
            return Err(EditorError::MissingField("title"));
        }
        if self.date.trim().is_empty() {
            return Err(EditorError::MissingField("date"));
        }

        Ok(DocumentRecord {
            tags: split_tags(&self.tag_input),
            id: self.id,
            title: self.title,
            date: self.date,
            thumbnail_url: self.thumbnail_url,
            youtube_url: self.youtube_url,
            summary: self.summary,
            content: self.content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_draft_uses_today_and_placeholders() {
        let now = Utc::now();
        let draft = EditorDraft::blank(now);
        assert_eq!(draft.date, now.format("%Y-%m-%d").to_string());
        assert_eq!(draft.thumbnail_url, NEW_THUMBNAIL_URL);
        assert_eq!(draft.youtube_url, DEFAULT_YOUTUBE_URL);
        assert!(draft.tag_input.is_empty());
    }

    #[test]
    fn tags_are_split_on_save() {
        let mut draft = EditorDraft::blank(Utc::now());
        draft.title = "T".into();
        draft.tag_input = "AI, , 区块链 ,DeFi".into();
        let record = draft.into_record().unwrap();
        assert_eq!(record.tags, vec!["AI", "区块链", "DeFi"]);
    }

    #[test]
    fn empty_title_is_rejected() {
        let draft = EditorDraft::blank(Utc::now());
        assert_eq!(draft.into_record(), Err(EditorError::MissingField("title")));
    }

    #[test]
    fn editing_round_trips_tag_line() {
        let mut draft = EditorDraft::blank(Utc::now());
        draft.title = "T".into();
        draft.tag_input = "a,b".into();
        let record = draft.into_record().unwrap();
        assert_eq!(EditorDraft::from_record(&record).tag_input, "a, b");
    }
}
