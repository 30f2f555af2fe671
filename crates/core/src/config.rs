//! Configuration for batch conversion runs.

use std::path::PathBuf;

use woff2_batch_codec::Flavor;

/// Directory scanned when none is given.
pub const DEFAULT_FONTS_DIR: &str = "src/app/fonts";

/// Source extensions converted by default, without the leading dot.
pub const SOURCE_EXTENSIONS: &[&str] = &["otf", "ttf"];

/// Settings for a single [`run`](crate::run).
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub dir: PathBuf,
    pub extensions: Vec<String>,
    pub case_sensitive: bool,
    pub flavor: Flavor,
    pub sanitize: bool,
    pub parallel: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_FONTS_DIR),
            extensions: SOURCE_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
            case_sensitive: true,
            flavor: Flavor::Woff2,
            sanitize: false,
            parallel: false,
        }
    }
}

impl BatchConfig {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), ..Default::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BatchConfig::default();
        assert_eq!(config.dir, PathBuf::from("src/app/fonts"));
        assert_eq!(config.extensions, ["otf", "ttf"]);
        assert!(config.case_sensitive);
        assert_eq!(config.flavor, Flavor::Woff2);
        assert!(!config.sanitize);
        assert!(!config.parallel);
    }
}
