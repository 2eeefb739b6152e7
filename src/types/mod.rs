pub mod identifiers;

pub use identifiers::RecordId;
