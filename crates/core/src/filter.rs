//! Extension-based selection of source fonts.

use anyhow::{Context, Result};
use glob::{MatchOptions, Pattern};

/// Matches file names against `*.<ext>` patterns.
#[derive(Debug, Clone)]
pub struct SourceFilter {
    patterns: Vec<Pattern>,
    options: MatchOptions,
}

impl SourceFilter {
    pub fn new<S: AsRef<str>>(extensions: &[S], case_sensitive: bool) -> Result<Self> {
        let patterns = extensions
            .iter()
            .map(|ext| {
                let ext = ext.as_ref().trim_start_matches('.');
                let pattern = format!("*.{}", Pattern::escape(ext));
                Pattern::new(&pattern).with_context(|| format!("Invalid extension: {ext}"))
            })
            .collect::<Result<Vec<_>>>()?;

        let options = MatchOptions { case_sensitive, ..MatchOptions::new() };
        Ok(Self { patterns, options })
    }

    pub fn matches(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches_with(name, self.options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_extensions() {
        let filter = SourceFilter::new(&["otf", "ttf"], true).unwrap();
        assert!(filter.matches("a.ttf"));
        assert!(filter.matches("b.otf"));
        assert!(filter.matches("Inter.Variable.ttf"));
        assert!(!filter.matches("c.woff2"));
        assert!(!filter.matches("ttf"));
        assert!(!filter.matches("a.ttf.bak"));
    }

    #[test]
    fn test_case_sensitive_by_default() {
        let filter = SourceFilter::new(&["otf", "ttf"], true).unwrap();
        assert!(!filter.matches("A.TTF"));
        assert!(!filter.matches("B.Otf"));
    }

    #[test]
    fn test_ignore_case() {
        let filter = SourceFilter::new(&["otf", "ttf"], false).unwrap();
        assert!(filter.matches("A.TTF"));
        assert!(filter.matches("B.Otf"));
    }

    #[test]
    fn test_leading_dot_and_metacharacters() {
        let filter = SourceFilter::new(&[".ttc", "[x]"], true).unwrap();
        assert!(filter.matches("collection.ttc"));
        assert!(filter.matches("odd.[x]"));
        assert!(!filter.matches("odd.x"));
    }

    #[test]
    fn test_no_extensions_matches_nothing() {
        let filter = SourceFilter::new::<&str>(&[], true).unwrap();
        assert!(!filter.matches("a.ttf"));
    }
}
