//! Per-file conversion.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use anyhow::{Result, ensure};
use log::info;
use woff2_batch_codec::{Flavor, Font};

/// Options applied to every file in a batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertOptions {
    pub flavor: Flavor,
    pub sanitize: bool,
}

/// Result of converting one source font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Converted { source: PathBuf, destination: PathBuf },
    Failed { source: PathBuf, message: String },
}

impl Outcome {
    pub fn source(&self) -> &Path {
        match self {
            Outcome::Converted { source, .. } | Outcome::Failed { source, .. } => source,
        }
    }

    pub fn is_converted(&self) -> bool {
        matches!(self, Outcome::Converted { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Converted { source, destination } => {
                write!(f, "Converted {} to {}", source.display(), destination.display())
            }
            Outcome::Failed { source, message } => {
                write!(f, "Failed to convert {}: {message}", source.display())
            }
        }
    }
}

/// Sibling of `source` with the extension replaced.
pub fn output_path(source: &Path, extension: &str) -> PathBuf {
    source.with_extension(extension)
}

/// Converts a single font file, capturing any failure in the [`Outcome`].
pub fn convert(source: &Path, options: &ConvertOptions) -> Outcome {
    convert_among(source, options, &[])
}

/// Like [`convert`], but also refuses to write over any of `sources`.
///
/// `sources` is the full set of files selected for the batch; an output that
/// lands on one of them is reported as a failure and nothing is written.
pub fn convert_among(source: &Path, options: &ConvertOptions, sources: &[PathBuf]) -> Outcome {
    match try_convert(source, options, sources) {
        Ok(destination) => Outcome::Converted { source: source.to_path_buf(), destination },
        Err(e) => Outcome::Failed { source: source.to_path_buf(), message: format!("{e:#}") },
    }
}

fn try_convert(source: &Path, options: &ConvertOptions, sources: &[PathBuf]) -> Result<PathBuf> {
    let mut font = Font::open(source)?;
    font.set_flavor(options.flavor);
    font.set_sanitize(options.sanitize);

    let destination = output_path(source, font.extension());
    ensure!(destination != source, "output path {} is the source file", destination.display());
    ensure!(
        !sources.contains(&destination),
        "output path {} is another source font",
        destination.display()
    );

    let written = font.save(&destination)?;

    let input_size = font.data().len() as f64 / 1024.0;
    let output_size = written as f64 / 1024.0;
    info!(
        "{} -> {} ({input_size:.1} KB -> {output_size:.1} KB, {:.1}% reduction)",
        source.file_name().unwrap_or_default().to_string_lossy(),
        destination.file_name().unwrap_or_default().to_string_lossy(),
        (1.0 - output_size / input_size) * 100.0
    );

    Ok(destination)
}
