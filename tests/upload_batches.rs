use chrono::{TimeZone, Utc};
use futures::executor::block_on;
use script_catalogue::catalogue::{sample_scripts, Library, LibraryConfig, LibraryError, MemoryStore};
use script_catalogue::document::RecordId;
use script_catalogue::ingest::{
    parse_upload, ExtractionPolicy, Extractor, IngestError, TextDecoder, UploadError, UploadFile,
    Utf8Decoder,
};

/// Decoder that refuses files whose name contains "broken".
struct FlakyDecoder;

impl TextDecoder for FlakyDecoder {
    async fn decode(&self, file: &UploadFile) -> Result<String, IngestError> {
        if file.name.contains("broken") {
            return Err(IngestError::Unreadable {
                name: file.name.clone(),
                reason: "stream closed".into(),
            });
        }
        Ok(String::from_utf8_lossy(&file.bytes).into_owned())
    }
}

fn library() -> Library<MemoryStore> {
    Library::open(LibraryConfig::new(None), sample_scripts(), MemoryStore::new())
}

#[test]
fn invariant_batch_without_markdown_is_rejected() {
    let mut library = library();
    let before = library.catalogue().clone();

    let files = vec![UploadFile::new("notes.txt", "# Not markdown")];
    let result = block_on(library.upload(&Utf8Decoder, &files));

    assert!(matches!(
        result,
        Err(LibraryError::Upload(UploadError::NoMarkdownFiles))
    ));
    assert_eq!(library.catalogue(), &before);
    assert!(library.store().value().is_none());
}

#[test]
fn invariant_markdown_media_type_qualifies() {
    assert!(UploadFile::new("README", "x").with_media_type("text/markdown").is_markdown());
    assert!(UploadFile::new("Upper.MD", "x").is_markdown());
    assert!(!UploadFile::new("notes.txt", "x").is_markdown());
}

#[test]
fn invariant_failed_file_does_not_abort_batch() {
    let extractor = Extractor::new(ExtractionPolicy::upload());
    let files = vec![
        UploadFile::new("ok-1.md", "# One"),
        UploadFile::new("broken.md", "# Lost"),
        UploadFile::new("ok-2.md", "# Two"),
        UploadFile::new("skip.txt", "ignored"),
    ];

    let outcome = block_on(parse_upload(&extractor, &FlakyDecoder, &files)).unwrap();

    assert_eq!(outcome.added_count(), 2);
    assert_eq!(outcome.failed_count(), 1);
    assert_eq!(outcome.failed[0].name, "broken.md");
    let titles: Vec<&str> = outcome.added.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["One", "Two"]);
}

#[test]
fn invariant_invalid_utf8_is_a_per_file_failure() {
    let extractor = Extractor::new(ExtractionPolicy::upload());
    let files = vec![UploadFile::new("bad.md", vec![0xc3u8, 0x28])];

    let outcome = block_on(parse_upload(&extractor, &Utf8Decoder, &files)).unwrap();
    assert_eq!(outcome.added_count(), 0);
    assert!(matches!(outcome.failed[0].error, IngestError::InvalidUtf8(_)));
}

#[test]
fn invariant_uploads_are_prepended_and_persisted() {
    let mut library = library();
    let files = vec![UploadFile::new("fresh.md", "---\nid: up-1\n---\n# Fresh\nbody")];

    let outcome = block_on(library.upload(&Utf8Decoder, &files)).unwrap();
    assert_eq!(outcome.added_count(), 1);

    let first = &library.catalogue().records()[0];
    assert_eq!(first.id.as_str(), "up-1");
    assert_eq!(library.catalogue().len(), 4);
    assert!(library.store().value().is_some());
}

#[test]
fn invariant_upload_with_existing_id_replaces_in_place() {
    let mut library = library();
    let files = vec![UploadFile::new(
        "rewrite.md",
        "---\nid: 2\ntitle: Rewritten\n---\nnew body",
    )];

    block_on(library.upload(&Utf8Decoder, &files)).unwrap();

    let ids: Vec<&str> = library.catalogue().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
    let replaced = library.catalogue().get(&RecordId::new("2")).unwrap();
    assert_eq!(replaced.title, "Rewritten");
    assert_eq!(replaced.content, "new body");
}

#[test]
fn invariant_heuristic_policy_can_drive_uploads() {
    let config = LibraryConfig::new(None).with_upload_policy(ExtractionPolicy::heuristic());
    let mut library = Library::open(config, vec![], MemoryStore::new());
    assert_eq!(library.config().upload_policy, ExtractionPolicy::heuristic());
    assert!(library.config().bulk_dir.is_none());
    let now = Utc.with_ymd_and_hms(2026, 2, 2, 0, 0, 0).unwrap();

    let files = vec![UploadFile::new("2025-09-09-notes.md", "# Notes\ntags: a, b\nbody")];
    block_on(library.upload_at(&Utf8Decoder, &files, now)).unwrap();

    let record = &library.catalogue().records()[0];
    assert_eq!(record.date, "2025-09-09");
    assert_eq!(record.tags, vec!["a", "b"]);
}
