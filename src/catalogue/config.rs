use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ingest::policy::ExtractionPolicy;

// Serializable, comparable, explicit defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Directory scanned by the bulk loader at startup. `None` skips it.
    pub bulk_dir: Option<PathBuf>,
    /// Policy applied to uploaded files.
    pub upload_policy: ExtractionPolicy,
}

impl LibraryConfig {
    pub fn new(bulk_dir: Option<PathBuf>) -> Self {
        Self {
            bulk_dir,
            upload_policy: ExtractionPolicy::upload(),
        }
    }

    pub fn with_upload_policy(mut self, policy: ExtractionPolicy) -> Self {
        self.upload_policy = policy;
        self
    }
}
