use crate::cache::CacheError;
use crate::input::LoadError;
use std::io;
use thiserror::Error;

/// Errors surfaced by the command-line front end.
#[derive(Error, Debug)]
pub enum FlashreadError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),

    #[error("no extractable text in {0}")]
    NoText(String),
}
