// The catalogue is the only owner of the working record list.
// It changes through insert_or_replace and delete, nothing else.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::DocumentRecord;
use crate::types::identifiers::RecordId;

/// Where `insert_or_replace` put a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// An existing record with the same id was replaced at `index`.
    Replaced { index: usize },
    /// The record was new and now sits at the front.
    Inserted,
}

/// Ordered, id-unique list of records for the running session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalogue {
    records: Vec<DocumentRecord>,
}

impl Catalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Combine the startup sources in precedence order.
    ///
    /// Records are taken from `baseline`, then `bulk`, then `persisted`; the
    /// first record seen for an id wins and later ones are discarded whole.
    /// Deterministic: the same inputs always give the same catalogue.
    pub fn merge(
        baseline: Vec<DocumentRecord>,
        bulk: Vec<DocumentRecord>,
        persisted: Vec<DocumentRecord>,
    ) -> Self {
        let mut seen: HashSet<RecordId> = HashSet::new();
        let mut records = Vec::with_capacity(baseline.len() + bulk.len() + persisted.len());

        for record in baseline.into_iter().chain(bulk).chain(persisted) {
            if seen.insert(record.id.clone()) {
                records.push(record);
            } else {
                debug!(id = %record.id, "discarding record with an id already in the catalogue");
            }
        }

        Self { records }
    }

    /// Replace the record with the same id in place, or prepend it.
    pub fn insert_or_replace(&mut self, record: DocumentRecord) -> Placement {
        match self.position(&record.id) {
            Some(index) => {
                self.records[index] = record;
                Placement::Replaced { index }
            }
            None => {
                self.records.insert(0, record);
                Placement::Inserted
            }
        }
    }

    /// Remove the record with `id`. Returns whether anything was removed.
    pub fn delete(&mut self, id: &RecordId) -> bool {
        match self.position(id) {
            Some(index) => {
                self.records.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &RecordId) -> Option<&DocumentRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.position(id).is_some()
    }

    pub fn records(&self) -> &[DocumentRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocumentRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn position(&self, id: &RecordId) -> Option<usize> {
        self.records.iter().position(|r| &r.id == id)
    }
}
