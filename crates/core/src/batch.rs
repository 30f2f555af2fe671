//! Directory scanning and batch execution.

use std::{
    fs::read_dir,
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::{Context, Result, bail};
use log::{debug, info};
use rayon::prelude::*;

use crate::{
    config::BatchConfig,
    convert::{ConvertOptions, Outcome, convert_among},
    filter::SourceFilter,
};

/// Outcomes of a batch, in directory listing order.
#[derive(Debug, Default)]
pub struct BatchResult {
    pub outcomes: Vec<Outcome>,
}

impl BatchResult {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_converted()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed() == 0
    }

    pub fn ok_or_bail(&self, operation: &str) -> Result<()> {
        if !self.all_succeeded() {
            bail!("{operation} failed: {} succeeded, {} failed", self.succeeded(), self.failed());
        }
        Ok(())
    }
}

/// Lists the immediate entries of `dir` whose names pass `filter`.
///
/// Entries are returned in the order the filesystem yields them.
pub fn scan(dir: &Path, filter: &SourceFilter) -> Result<Vec<PathBuf>> {
    let entries =
        read_dir(dir).with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    let mut sources = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
        let name = entry.file_name();
        if filter.matches(&name.to_string_lossy()) {
            sources.push(entry.path());
        } else {
            debug!("Skipping {}", entry.path().display());
        }
    }
    Ok(sources)
}

/// Converts every matching font in `config.dir`, printing one line per file.
///
/// Per-file failures are reported in the result; only a directory that cannot
/// be listed is an error.
pub fn run(config: &BatchConfig) -> Result<BatchResult> {
    let filter = SourceFilter::new(config.extensions.as_slice(), config.case_sensitive)?;
    let sources = scan(&config.dir, &filter)?;
    let options = ConvertOptions { flavor: config.flavor, sanitize: config.sanitize };

    info!("Found {} source fonts in {}", sources.len(), config.dir.display());
    let start = Instant::now();

    let outcomes = if config.parallel {
        let outcomes: Vec<Outcome> =
            sources.par_iter().map(|s| convert_among(s, &options, &sources)).collect();
        outcomes.iter().for_each(report);
        outcomes
    } else {
        sources
            .iter()
            .map(|s| {
                let outcome = convert_among(s, &options, &sources);
                report(&outcome);
                outcome
            })
            .collect()
    };

    let result = BatchResult { outcomes };
    info!(
        "{}: {} succeeded, {} failed in {:.2?}",
        config.flavor,
        result.succeeded(),
        result.failed(),
        start.elapsed()
    );
    Ok(result)
}

fn report(outcome: &Outcome) {
    println!("{outcome}");
}
