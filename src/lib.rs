//! Word-at-a-time reading tokens from paged documents.
//!
//! Extracted words pass through hyphen repair, monosyllable grouping and a
//! punctuation-aware assembler that weights every token by the number of
//! source words it stands for. The `reading` and `ui` modules consume that
//! stream to drive a terminal speed reader.

pub mod cache;
pub mod config;
pub mod error;
pub mod input;
pub mod reading;
pub mod segment;
pub mod ui;

pub use error::FlashreadError;
pub use segment::{build_reading_tokens, process_document, PagedText, TokenStream, TokenizedDocument};
