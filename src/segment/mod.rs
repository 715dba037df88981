pub mod assembler;
pub mod classify;
pub mod grouping;
pub mod hyphen;
pub mod pipeline;
pub mod stream;

pub use assembler::assemble_tokens;
pub use classify::{
    has_trailing_period, has_trailing_punctuation, is_alphabetic_word, is_monosyllabic,
};
pub use grouping::group_monosyllables;
pub use hyphen::repair_hyphens;
pub use pipeline::{build_reading_tokens, process_document};
pub use stream::{PagedText, ReadingToken, TokenStream, TokenizedDocument};
