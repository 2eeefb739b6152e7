//! Markdown script catalogue.
//!
//! `script-catalogue` turns loosely structured markdown (with or without a
//! leading `---` metadata block) into uniform `DocumentRecord`s, merges
//! records from compiled-in samples, a bulk directory and a persisted
//! snapshot into one id-unique catalogue, and renders a record body as a
//! sequence of simple display blocks.

pub mod catalogue;
pub mod chat;
pub mod document;
pub mod editor;
pub mod ingest;
pub mod render;
pub mod types;
