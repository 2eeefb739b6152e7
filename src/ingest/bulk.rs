use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::document::DocumentRecord;
use crate::ingest::extract::Extractor;
use crate::ingest::policy::ExtractionPolicy;
use crate::ingest::{decode_utf8, IngestError};
use crate::types::identifiers::RecordId;

/// Loads the fixed set of markdown resources available at startup.
///
/// Never fails as a whole: unreadable resources are logged and dropped, and
/// an unavailable directory yields an empty list.
#[derive(Debug, Clone)]
pub struct BulkLoader {
    extractor: Extractor,
}

impl Default for BulkLoader {
    fn default() -> Self {
        Self::new(Extractor::new(ExtractionPolicy::bulk()))
    }
}

impl BulkLoader {
    pub fn new(extractor: Extractor) -> Self {
        Self { extractor }
    }

    /// Every `*.md` file directly under `dir`, in file name order.
    pub fn load_dir(&self, dir: &Path) -> Vec<DocumentRecord> {
        let paths = match list_markdown(dir) {
            Ok(paths) => paths,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "bulk directory unavailable");
                return Vec::new();
            }
        };

        let items = paths.into_iter().map(|path| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let text = fs::read(&path)
                .map_err(IngestError::from)
                .and_then(decode_utf8);
            (name, text)
        });
        self.load_items(items)
    }

    /// In-memory resources, e.g. files bundled into the binary.
    pub fn load_bytes<I>(&self, resources: I) -> Vec<DocumentRecord>
    where
        I: IntoIterator<Item = (String, Vec<u8>)>,
    {
        self.load_items(
            resources
                .into_iter()
                .map(|(name, bytes)| (name, decode_utf8(bytes))),
        )
    }

    fn load_items<I>(&self, items: I) -> Vec<DocumentRecord>
    where
        I: IntoIterator<Item = (String, Result<String, IngestError>)>,
    {
        let loaded_at = self.extractor.now();
        let mut records = Vec::new();
        let mut failed = 0usize;

        // Position counts failed items too, so ids stay stable per position.
        for (index, (name, text)) in items.into_iter().enumerate() {
            match text {
                Ok(text) => {
                    let id = RecordId::batch(loaded_at, index);
                    records.push(self.extractor.extract_with_id(&name, &text, id));
                }
                Err(e) => {
                    warn!(resource = %name, error = %e, "skipping unreadable markdown resource");
                    failed += 1;
                }
            }
        }

        info!(loaded = records.len(), failed, "bulk markdown load finished");
        records
    }
}

fn list_markdown(dir: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_md = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("md"));
        if is_md && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}
