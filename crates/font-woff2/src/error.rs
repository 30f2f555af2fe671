//! Error types for font codec operations.

use std::{io, path::PathBuf, result};

use read_fonts::ReadError;

/// Errors that can occur while loading or serializing a font.
///
/// Underlying causes are exposed through `source()` only, so chained
/// formatting prints each cause once.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse font")]
    Parse(#[from] ReadError),

    #[error("no valid codepoints found in font")]
    NoCodepoints,

    #[error("failed to subset font: {0}")]
    Subset(String),

    #[error("failed to compress font: {0}")]
    Compress(String),

    #[error("unknown flavor {0:?} (expected \"woff2\" or \"sfnt\")")]
    UnknownFlavor(String),
}

pub type Result<T> = result::Result<T, Error>;
