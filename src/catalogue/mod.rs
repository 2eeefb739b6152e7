pub mod baseline;
pub mod catalogue;
pub mod config;
pub mod library;
pub mod store;

pub use baseline::sample_scripts;
pub use catalogue::{Catalogue, Placement};
pub use config::LibraryConfig;
pub use library::{Library, LibraryError};
pub use store::{
    decode_snapshot, encode_snapshot, load_snapshot, read_snapshot, save_snapshot, FileStore,
    MemoryStore, SnapshotState, SnapshotStore, StoreError, SNAPSHOT_FILE,
};
