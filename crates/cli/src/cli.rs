//! CLI definitions and dispatch.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::debug;

use woff2_batch_core::{BatchConfig, DEFAULT_FONTS_DIR, Flavor, SOURCE_EXTENSIONS, run};

#[derive(Debug, Parser)]
#[command(name = "woff2-batch")]
#[command(about = "Convert every OpenType/TrueType font in a directory to WOFF2")]
pub struct Cli {
    /// Directory containing the source fonts (not searched recursively)
    #[arg(default_value = DEFAULT_FONTS_DIR)]
    pub dir: PathBuf,

    /// Source file extension to convert; repeat for several
    #[arg(
        short,
        long = "ext",
        value_name = "EXT",
        default_values_t = SOURCE_EXTENSIONS.iter().map(|e| e.to_string())
    )]
    pub extensions: Vec<String>,

    /// Match extensions regardless of case
    #[arg(long)]
    pub ignore_case: bool,

    /// Output flavor: woff2 or sfnt
    #[arg(long, default_value = "woff2", value_parser = parse_flavor)]
    pub flavor: Flavor,

    /// Remove glyphs known to break WOFF2 decoding in browsers
    #[arg(long)]
    pub sanitize: bool,

    /// Convert files concurrently; results are printed once all are done
    #[arg(short, long)]
    pub parallel: bool,

    /// Exit with an error if any file fails to convert
    #[arg(long)]
    pub strict: bool,
}

fn parse_flavor(s: &str) -> Result<Flavor, String> {
    s.parse::<Flavor>().map_err(|e| e.to_string())
}

impl Cli {
    pub fn config(&self) -> BatchConfig {
        BatchConfig {
            dir: self.dir.clone(),
            extensions: self.extensions.clone(),
            case_sensitive: !self.ignore_case,
            flavor: self.flavor,
            sanitize: self.sanitize,
            parallel: self.parallel,
        }
    }

    pub fn run(self) -> Result<()> {
        let config = self.config();
        debug!("{config:?}");
        let result = run(&config)?;
        if self.strict {
            result.ok_or_bail(&format!("{} conversion", config.flavor))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["woff2-batch"]);
        let config = cli.config();
        assert_eq!(config.dir, PathBuf::from("src/app/fonts"));
        assert_eq!(config.extensions, ["otf", "ttf"]);
        assert!(config.case_sensitive);
        assert_eq!(config.flavor, Flavor::Woff2);
        assert!(!config.parallel);
        assert!(!cli.strict);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "woff2-batch",
            "assets/fonts",
            "--ext",
            "ttc",
            "--ignore-case",
            "--flavor",
            "SFNT",
            "--sanitize",
            "-p",
            "--strict",
        ]);
        let config = cli.config();
        assert_eq!(config.dir, PathBuf::from("assets/fonts"));
        assert_eq!(config.extensions, ["ttc"]);
        assert!(!config.case_sensitive);
        assert_eq!(config.flavor, Flavor::Sfnt);
        assert!(config.sanitize);
        assert!(config.parallel);
        assert!(cli.strict);
    }

    #[test]
    fn test_unknown_flavor_rejected() {
        assert!(Cli::try_parse_from(["woff2-batch", "--flavor", "woff"]).is_err());
    }
}
