use std::io;

use thiserror::Error;

/// Errors the host side of the crate can run into.
///
/// Malformed dump lines never show up here: the extractor reports them
/// through [`crate::diagnostics::Diagnostics`] and keeps going.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    #[error("no bugreport text entry found in {0}")]
    NoBugreportEntry(String),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("table misuse: {0}")]
    Table(String),
}

pub type Result<T> = std::result::Result<T, Error>;
