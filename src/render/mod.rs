//! Line-oriented markdown to display blocks.
//!
//! Only a small subset is understood: three heading levels, quotes, flat
//! bullet and numbered items, blank lines and `**bold**` inside text. Each
//! input line maps to exactly one block; there are no multi-line constructs.

pub mod blocks;
pub mod inline;

pub use blocks::{classify_line, render, Block, Blocks};
pub use inline::{parse_inline, Inline};
