pub mod metadata;
pub mod record;

pub use crate::types::identifiers::RecordId;
pub use metadata::FrontMatter;
pub use record::{split_tags, DocumentRecord};
