use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{info, warn};

use crate::catalogue::catalogue::{Catalogue, Placement};
use crate::catalogue::config::LibraryConfig;
use crate::catalogue::store::{read_snapshot, save_snapshot, SnapshotState, SnapshotStore, StoreError};
use crate::document::DocumentRecord;
use crate::editor::{EditorDraft, EditorError};
use crate::ingest::bulk::BulkLoader;
use crate::ingest::extract::Extractor;
use crate::ingest::upload::{parse_upload, TextDecoder, UploadError, UploadFile, UploadOutcome};
use crate::types::identifiers::RecordId;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error(transparent)]
    Editor(#[from] EditorError),
}

/// The running catalogue together with the store it is mirrored to.
///
/// Every successful mutation writes the whole catalogue back to the store.
/// A failed write is logged; the in-memory catalogue stays authoritative.
#[derive(Debug)]
pub struct Library<S> {
    catalogue: Catalogue,
    store: S,
    config: LibraryConfig,
}

impl<S: SnapshotStore> Library<S> {
    /// Assemble the startup catalogue from `baseline`, the bulk directory
    /// and the stored snapshot, in that precedence order.
    ///
    /// A discarded snapshot is overwritten with the assembled catalogue
    /// straight away; an absent one is left absent until the first change.
    pub fn open(config: LibraryConfig, baseline: Vec<DocumentRecord>, store: S) -> Self {
        let bulk = match &config.bulk_dir {
            Some(dir) => BulkLoader::default().load_dir(dir),
            None => Vec::new(),
        };
        let snapshot = read_snapshot(&store);
        let discarded = snapshot == SnapshotState::Discarded;
        let persisted = snapshot.into_records();
        let persisted_count = persisted.len();

        let catalogue = Catalogue::merge(baseline, bulk, persisted);
        info!(
            records = catalogue.len(),
            persisted = persisted_count,
            "catalogue assembled"
        );

        let mut library = Self {
            catalogue,
            store,
            config,
        };
        if discarded {
            library.persist_logged();
        }
        library
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    /// Parse an upload batch and insert every parsed record.
    ///
    /// A rejected batch leaves the catalogue untouched.
    pub async fn upload<D: TextDecoder>(
        &mut self,
        decoder: &D,
        files: &[UploadFile],
    ) -> Result<UploadOutcome, LibraryError> {
        self.upload_at(decoder, files, Utc::now()).await
    }

    /// `upload` with a pinned clock for default dates and ids.
    pub async fn upload_at<D: TextDecoder>(
        &mut self,
        decoder: &D,
        files: &[UploadFile],
        now: DateTime<Utc>,
    ) -> Result<UploadOutcome, LibraryError> {
        let extractor = Extractor::new(self.config.upload_policy.clone()).at(now);
        let outcome = parse_upload(&extractor, decoder, files).await?;

        if !outcome.added.is_empty() {
            for record in &outcome.added {
                self.catalogue.insert_or_replace(record.clone());
            }
            self.persist_logged();
        }
        Ok(outcome)
    }

    /// Save an editor draft as a full replacement (or a new record).
    pub fn save_draft(&mut self, draft: EditorDraft) -> Result<Placement, LibraryError> {
        let record = draft.into_record()?;
        let placement = self.catalogue.insert_or_replace(record);
        self.persist_logged();
        Ok(placement)
    }

    pub fn delete(&mut self, id: &RecordId) -> bool {
        let removed = self.catalogue.delete(id);
        if removed {
            self.persist_logged();
        }
        removed
    }

    /// Write the current catalogue to the store.
    pub fn persist(&mut self) -> Result<(), StoreError> {
        save_snapshot(&mut self.store, &self.catalogue)
    }

    fn persist_logged(&mut self) {
        if let Err(e) = self.persist() {
            warn!(error = %e, "failed to save catalogue snapshot");
        }
    }
}
