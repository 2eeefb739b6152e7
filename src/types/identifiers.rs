use std::process;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Length of the random suffix appended to generated ids.
const SUFFIX_LEN: usize = 9;

static GENERATED: AtomicU64 = AtomicU64::new(0);

/// Identity key of a record within a catalogue.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        RecordId(id.into())
    }

    /// Fresh id: millisecond timestamp followed by a random-looking suffix.
    ///
    /// The suffix hashes the wall clock nanoseconds, the process id and a
    /// process-wide counter, so two ids minted in the same millisecond still
    /// differ. Collisions across processes are possible but negligible.
    pub fn generate(now: DateTime<Utc>) -> Self {
        let seq = GENERATED.fetch_add(1, Ordering::Relaxed);
        let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();

        let mut hasher = Sha256::new();
        hasher.update(nanos.to_le_bytes());
        hasher.update(process::id().to_le_bytes());
        hasher.update(seq.to_le_bytes());
        let suffix = hex::encode(hasher.finalize());

        RecordId(format!(
            "{}{}",
            now.timestamp_millis(),
            &suffix[..SUFFIX_LEN]
        ))
    }

    /// Id for the `index`-th item of one bulk load started at `loaded_at`.
    pub fn batch(loaded_at: DateTime<Utc>, index: usize) -> Self {
        RecordId(format!("md-{}-{}", loaded_at.timestamp_millis(), index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generated_ids_are_distinct_within_one_millisecond() {
        let now = Utc::now();
        let ids: HashSet<RecordId> = (0..1000).map(|_| RecordId::generate(now)).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn generated_id_starts_with_timestamp() {
        let now = Utc::now();
        let id = RecordId::generate(now);
        let millis = now.timestamp_millis().to_string();
        assert!(id.as_str().starts_with(&millis));
        assert_eq!(id.as_str().len(), millis.len() + SUFFIX_LEN);
    }

    #[test]
    fn batch_ids_follow_position() {
        let now = Utc::now();
        assert_ne!(RecordId::batch(now, 0), RecordId::batch(now, 1));
        assert!(RecordId::batch(now, 3).as_str().ends_with("-3"));
    }
}
